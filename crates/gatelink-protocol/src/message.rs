use crate::commands::Operation;
use std::fmt;

/// Fully rendered command text, ready to be handed to an SMS sender.
///
/// Never persisted. Obtain one from [`crate::build`] or [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCommand {
    operation: Operation,
    text: String,
}

impl RelayCommand {
    pub(crate) fn new(operation: Operation, text: String) -> Self {
        RelayCommand { operation, text }
    }

    /// Operation that produced this command.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Length of the command text in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.text.len()
    }
}

impl fmt::Display for RelayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RelayCommand {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
