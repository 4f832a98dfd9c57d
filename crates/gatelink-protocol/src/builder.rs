use crate::{
    commands::{Command, Operation},
    message::RelayCommand,
};
use gatelink_core::{
    AccessControlMode, AdminNumber, LatchTime, Password, Phone, Serial, SettingsState, TimeWindow,
    ValidationError, ValidationResult,
    constants::{SEPARATOR, SERIAL_WIDTH},
};
use tracing::debug;

const PLACEHOLDER_NUMBER: &str = "xxxxxxxxxx";
const PLACEHOLDER_PASSWORD: &str = "xxxx";
const PLACEHOLDER_SERIAL: &str = "xxx";

/// Raw, unvalidated field values for one operation, as typed into a form.
///
/// Fields an operation does not use are ignored. Fields left unset fall back
/// to the settings state where it holds a value (admin number, access mode,
/// latch time); otherwise they are treated as empty input.
///
/// # Example
/// ```
/// use gatelink_protocol::CommandFields;
///
/// let fields = CommandFields::new()
///     .serial("16")
///     .phone("123456")
///     .window("2408050800", "2409051000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFields {
    admin_number: Option<String>,
    new_password: Option<String>,
    serial: Option<String>,
    phone: Option<String>,
    start: Option<String>,
    end: Option<String>,
    mode: Option<String>,
    latch_time: Option<String>,
}

impl CommandFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admin_number(mut self, value: impl Into<String>) -> Self {
        self.admin_number = Some(value.into());
        self
    }

    pub fn new_password(mut self, value: impl Into<String>) -> Self {
        self.new_password = Some(value.into());
        self
    }

    pub fn serial(mut self, value: impl Into<String>) -> Self {
        self.serial = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    pub fn start(mut self, value: impl Into<String>) -> Self {
        self.start = Some(value.into());
        self
    }

    pub fn end(mut self, value: impl Into<String>) -> Self {
        self.end = Some(value.into());
        self
    }

    /// Set both sides of the time window.
    pub fn window(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start(start).end(end)
    }

    pub fn mode(mut self, value: impl Into<String>) -> Self {
        self.mode = Some(value.into());
        self
    }

    pub fn latch_time(mut self, value: impl Into<String>) -> Self {
        self.latch_time = Some(value.into());
        self
    }
}

/// Composes relay commands against a read-only view of the settings.
///
/// The builder never mutates the state, never persists and never sends.
/// Identical inputs always produce identical command text.
///
/// # Example
/// ```
/// use gatelink_core::SettingsState;
/// use gatelink_protocol::{CommandBuilder, CommandFields, Operation};
///
/// let state = SettingsState::default();
/// let builder = CommandBuilder::new(&state);
///
/// let cmd = builder
///     .build(Operation::SetLatchTime, &CommandFields::new().latch_time("30"))
///     .unwrap();
/// assert_eq!(cmd.as_str(), "1234GOT030#");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    state: &'a SettingsState,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(state: &'a SettingsState) -> Self {
        CommandBuilder { state }
    }

    /// Validate every field `operation` needs, in template order.
    ///
    /// # Errors
    /// Returns the first failing field's `ValidationError`; nothing is
    /// constructed in that case.
    pub fn resolve(&self, operation: Operation, fields: &CommandFields) -> ValidationResult<Command> {
        let command = match operation {
            Operation::RegisterAdmin => {
                let admin_number = match fields.admin_number.as_deref() {
                    Some(raw) => AdminNumber::parse(raw)?,
                    None => self
                        .state
                        .admin_number()
                        .cloned()
                        .ok_or(ValidationError::EmptyAdminNumber)?,
                };
                Command::RegisterAdmin { admin_number }
            }
            Operation::ChangePassword => Command::ChangePassword {
                new_password: Password::parse(raw_or_empty(&fields.new_password))?,
            },
            Operation::AddUser => {
                let serial = Serial::parse(raw_or_empty(&fields.serial))?;
                let phone = Phone::parse(raw_or_empty(&fields.phone))?;
                let window = TimeWindow::from_parts(fields.start.as_deref(), fields.end.as_deref())?;
                Command::AddUser {
                    serial,
                    phone,
                    window,
                }
            }
            Operation::DeleteUser => Command::DeleteUser {
                serial: Serial::parse(raw_or_empty(&fields.serial))?,
            },
            Operation::SetAccessMode => Command::SetAccessMode {
                mode: match fields.mode.as_deref() {
                    Some(raw) => AccessControlMode::parse(raw)?,
                    None => self.state.access_control_mode(),
                },
            },
            Operation::SetLatchTime => Command::SetLatchTime {
                latch_time: fields
                    .latch_time
                    .as_deref()
                    .map(LatchTime::parse)
                    .unwrap_or_else(|| self.state.latch_time()),
            },
            Operation::RelayOn => Command::RelayOn,
            Operation::RelayOff => Command::RelayOff,
        };

        Ok(command)
    }

    /// Render an already validated command with the current password.
    pub fn render(&self, command: &Command) -> RelayCommand {
        RelayCommand::new(command.operation(), command.render(self.state.password()))
    }

    /// Validate `fields` and render the command for `operation`.
    ///
    /// # Errors
    /// Returns the first `ValidationError` encountered.
    pub fn build(&self, operation: Operation, fields: &CommandFields) -> ValidationResult<RelayCommand> {
        match self.resolve(operation, fields) {
            Ok(command) => {
                debug!(operation = %operation, "Relay command built");
                Ok(self.render(&command))
            }
            Err(err) => {
                debug!(operation = %operation, error = %err, "Relay command rejected");
                Err(err)
            }
        }
    }

    /// Render what `operation` would send, without validating anything.
    ///
    /// Missing values are shown as placeholders (`xxxxxxxxxx` for numbers,
    /// `xxxx` for a password, `xxx` for a serial). The window part is shown
    /// as soon as a start is typed.
    pub fn preview(&self, operation: Operation, fields: &CommandFields) -> String {
        let mut out = String::from(self.state.password().as_str());
        if let Some(keyword) = operation.keyword() {
            out.push_str(keyword);
        }

        match operation {
            Operation::RegisterAdmin => {
                let admin = fields
                    .admin_number
                    .clone()
                    .filter(|s| !s.is_empty())
                    .or_else(|| self.state.admin_number().map(|a| a.to_string()))
                    .unwrap_or_else(|| PLACEHOLDER_NUMBER.to_string());
                out.push_str(&admin);
                out.push(SEPARATOR);
            }
            Operation::ChangePassword => {
                out.push_str(non_empty_or(&fields.new_password, PLACEHOLDER_PASSWORD));
            }
            Operation::AddUser => {
                out.push_str(&preview_serial(&fields.serial));
                out.push(SEPARATOR);
                out.push_str(non_empty_or(&fields.phone, PLACEHOLDER_NUMBER));
                out.push(SEPARATOR);
                if let Some(start) = fields.start.as_deref().filter(|s| !s.is_empty()) {
                    out.push_str(start);
                    out.push(SEPARATOR);
                    out.push_str(raw_or_empty(&fields.end));
                    out.push(SEPARATOR);
                }
            }
            Operation::DeleteUser => {
                out.push_str(&preview_serial(&fields.serial));
                out.push(SEPARATOR);
                out.push(SEPARATOR);
            }
            Operation::SetAccessMode => {
                match fields.mode.as_deref() {
                    Some(mode) => out.push_str(mode),
                    None => out.push_str(self.state.access_control_mode().as_str()),
                }
                out.push(SEPARATOR);
            }
            Operation::SetLatchTime => {
                let latch = fields
                    .latch_time
                    .as_deref()
                    .map(LatchTime::parse)
                    .unwrap_or_else(|| self.state.latch_time());
                out.push_str(&latch.to_string());
                out.push(SEPARATOR);
            }
            Operation::RelayOn | Operation::RelayOff => {}
        }

        out
    }
}

/// Build the command for `operation` from raw `fields` against `state`.
///
/// # Errors
/// Returns the first `ValidationError` encountered; no partial command is
/// ever produced.
///
/// # Example
/// ```
/// use gatelink_core::SettingsState;
/// use gatelink_protocol::{build, CommandFields, Operation};
///
/// let state = SettingsState::default();
/// let cmd = build(Operation::DeleteUser, &CommandFields::new().serial("2"), &state).unwrap();
/// assert_eq!(cmd.as_str(), "1234A002##");
/// ```
pub fn build(
    operation: Operation,
    fields: &CommandFields,
    state: &SettingsState,
) -> ValidationResult<RelayCommand> {
    CommandBuilder::new(state).build(operation, fields)
}

/// Preview the text `operation` would send. See [`CommandBuilder::preview`].
pub fn preview(operation: Operation, fields: &CommandFields, state: &SettingsState) -> String {
    CommandBuilder::new(state).preview(operation, fields)
}

fn raw_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn non_empty_or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().filter(|s| !s.is_empty()).unwrap_or(placeholder)
}

fn preview_serial(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => format!("{raw:0>width$}", width = SERIAL_WIDTH),
        None => PLACEHOLDER_SERIAL.to_string(),
    }
}
