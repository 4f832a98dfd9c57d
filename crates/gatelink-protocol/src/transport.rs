//! Hand-off of finished commands to an SMS sender.
//!
//! This crate never sends anything itself. A [`SmsDispatch`] pairs a command
//! with the relay's own number and can be rendered as an `sms:` link for the
//! platform's messaging app, or given to any [`SmsTransport`].

use crate::message::RelayCommand;
use gatelink_core::{Error, Phone, Result, SettingsState};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Messaging platform; decides how the `sms:` link separates the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Other => "other",
        }
    }

    fn body_separator(&self) -> char {
        match self {
            Platform::Ios => '&',
            Platform::Android | Platform::Other => '?',
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "other" => Ok(Platform::Other),
            _ => Err(Error::Config(format!("Unknown platform: {s}"))),
        }
    }
}

/// A command addressed to a relay unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDispatch {
    pub destination: Phone,
    pub command: RelayCommand,
}

impl SmsDispatch {
    pub fn new(destination: Phone, command: RelayCommand) -> Self {
        SmsDispatch {
            destination,
            command,
        }
    }

    /// Address `command` to the unit number held in `state`.
    ///
    /// # Errors
    /// Returns `Error::MissingUnitNumber` if no unit number is configured.
    pub fn for_state(state: &SettingsState, command: RelayCommand) -> Result<Self> {
        let destination = state.unit_number().cloned().ok_or(Error::MissingUnitNumber)?;
        Ok(SmsDispatch::new(destination, command))
    }

    /// Render an `sms:` link that opens the messaging app pre-filled.
    ///
    /// # Example
    /// ```
    /// use gatelink_core::{Phone, SettingsState};
    /// use gatelink_protocol::{build, CommandFields, Operation, Platform, SmsDispatch};
    ///
    /// let state = SettingsState::default();
    /// let cmd = build(Operation::SetAccessMode, &CommandFields::new().mode("ALL"), &state).unwrap();
    /// let dispatch = SmsDispatch::new(Phone::parse("+32470000000").unwrap(), cmd);
    ///
    /// assert_eq!(dispatch.uri(Platform::Android), "sms:+32470000000?body=1234ALL%23");
    /// assert_eq!(dispatch.uri(Platform::Ios), "sms:+32470000000&body=1234ALL%23");
    /// ```
    pub fn uri(&self, platform: Platform) -> String {
        format!(
            "sms:{}{}body={}",
            self.destination,
            platform.body_separator(),
            encode_component(self.command.as_str())
        )
    }
}

/// Something that can deliver a dispatch to the relay.
///
/// Delivery is fire-and-forget from the relay's side: the relay sends no
/// acknowledgement this crate could observe.
pub trait SmsTransport {
    type Error;

    fn send(&mut self, dispatch: &SmsDispatch) -> std::result::Result<(), Self::Error>;
}

/// Collects dispatches instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct RecordingTransport {
    sent: Vec<SmsDispatch>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[SmsDispatch] {
        &self.sent
    }
}

impl SmsTransport for RecordingTransport {
    type Error = std::convert::Infallible;

    fn send(&mut self, dispatch: &SmsDispatch) -> std::result::Result<(), Self::Error> {
        debug!(operation = %dispatch.command.operation(), "Dispatch recorded");
        self.sent.push(dispatch.clone());
        Ok(())
    }
}

// Percent-encode everything outside A-Z a-z 0-9 - _ . ! ~ * ' ( )
fn encode_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
        }
    }
    out
}
