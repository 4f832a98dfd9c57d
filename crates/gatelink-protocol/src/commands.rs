//! Command grammar of the GSM relay.
//!
//! Every relay operation has one fixed template. The current password is
//! always the first four characters and is immediately followed by the
//! operation keyword; there is no delimiter between the two.
//!
//! | Operation | Template |
//! |-----------|----------|
//! | Register admin | `pwd TEL00 admin #` |
//! | Change password | `pwd P new` |
//! | Add user | `pwd A serial # phone #` |
//! | Add user (window) | `pwd A serial # phone # start # end #` |
//! | Delete user | `pwd A serial # #` |
//! | Access mode | `pwd ALL #` or `pwd AUT #` |
//! | Latch time | `pwd GOT latch #` |
//! | Relay ON | `pwd CC` |
//! | Relay OFF | `pwd DD` |
//!
//! Field order is significant to the firmware and commands are
//! case-sensitive ASCII.
//!
//! # Examples
//!
//! ```
//! use gatelink_core::{Password, Serial};
//! use gatelink_protocol::Command;
//!
//! let password = Password::default();
//! let delete = Command::DeleteUser { serial: Serial::new(2).unwrap() };
//! assert_eq!(delete.render(&password), "1234A002##");
//! assert_eq!(Command::RelayOn.render(&password), "1234CC");
//! ```

use gatelink_core::{
    AccessControlMode, AdminNumber, Error, LatchTime, Password, Phone, Result, Serial, TimeWindow,
    constants::{
        KEYWORD_CHANGE_PASSWORD, KEYWORD_LATCH_TIME, KEYWORD_REGISTER_ADMIN, KEYWORD_RELAY_OFF,
        KEYWORD_RELAY_ON, KEYWORD_USER, SEPARATOR,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relay operations that produce a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    RegisterAdmin,
    ChangePassword,
    AddUser,
    DeleteUser,
    SetAccessMode,
    SetLatchTime,
    RelayOn,
    RelayOff,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::RegisterAdmin,
        Operation::ChangePassword,
        Operation::AddUser,
        Operation::DeleteUser,
        Operation::SetAccessMode,
        Operation::SetLatchTime,
        Operation::RelayOn,
        Operation::RelayOff,
    ];

    /// Parse an operation name such as `addUser` or `add-user`.
    ///
    /// # Errors
    /// Returns `Error::UnknownOperation` for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "registerAdmin" | "register-admin" => Ok(Operation::RegisterAdmin),
            "changePassword" | "change-password" => Ok(Operation::ChangePassword),
            "addUser" | "add-user" => Ok(Operation::AddUser),
            "deleteUser" | "delete-user" => Ok(Operation::DeleteUser),
            "setAccessMode" | "set-access-mode" => Ok(Operation::SetAccessMode),
            "setLatchTime" | "set-latch-time" => Ok(Operation::SetLatchTime),
            "relayOn" | "relay-on" => Ok(Operation::RelayOn),
            "relayOff" | "relay-off" => Ok(Operation::RelayOff),
            _ => Err(Error::UnknownOperation(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RegisterAdmin => "registerAdmin",
            Operation::ChangePassword => "changePassword",
            Operation::AddUser => "addUser",
            Operation::DeleteUser => "deleteUser",
            Operation::SetAccessMode => "setAccessMode",
            Operation::SetLatchTime => "setLatchTime",
            Operation::RelayOn => "relayOn",
            Operation::RelayOff => "relayOff",
        }
    }

    /// Keyword written right after the password.
    ///
    /// `None` for [`Operation::SetAccessMode`], whose keyword is the mode itself.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Operation::RegisterAdmin => Some(KEYWORD_REGISTER_ADMIN),
            Operation::ChangePassword => Some(KEYWORD_CHANGE_PASSWORD),
            Operation::AddUser | Operation::DeleteUser => Some(KEYWORD_USER),
            Operation::SetAccessMode => None,
            Operation::SetLatchTime => Some(KEYWORD_LATCH_TIME),
            Operation::RelayOn => Some(KEYWORD_RELAY_ON),
            Operation::RelayOff => Some(KEYWORD_RELAY_OFF),
        }
    }

    /// Returns `true` if the operation switches the relay output.
    pub fn is_relay_control(&self) -> bool {
        matches!(self, Operation::RelayOn | Operation::RelayOff)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::parse(s)
    }
}

/// A relay command whose fields have all been validated.
///
/// Rendering cannot fail: every field is already in its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RegisterAdmin {
        admin_number: AdminNumber,
    },
    ChangePassword {
        new_password: Password,
    },
    AddUser {
        serial: Serial,
        phone: Phone,
        window: Option<TimeWindow>,
    },
    DeleteUser {
        serial: Serial,
    },
    SetAccessMode {
        mode: AccessControlMode,
    },
    SetLatchTime {
        latch_time: LatchTime,
    },
    RelayOn,
    RelayOff,
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::RegisterAdmin { .. } => Operation::RegisterAdmin,
            Command::ChangePassword { .. } => Operation::ChangePassword,
            Command::AddUser { .. } => Operation::AddUser,
            Command::DeleteUser { .. } => Operation::DeleteUser,
            Command::SetAccessMode { .. } => Operation::SetAccessMode,
            Command::SetLatchTime { .. } => Operation::SetLatchTime,
            Command::RelayOn => Operation::RelayOn,
            Command::RelayOff => Operation::RelayOff,
        }
    }

    /// Render the command text using `password` as the prefix.
    ///
    /// `password` must be the password the relay currently holds; for a
    /// password change that is the old one.
    pub fn render(&self, password: &Password) -> String {
        let mut out = String::with_capacity(32);
        out.push_str(password.as_str());
        if let Some(keyword) = self.operation().keyword() {
            out.push_str(keyword);
        }

        match self {
            Command::RegisterAdmin { admin_number } => {
                out.push_str(admin_number.as_str());
                out.push(SEPARATOR);
            }
            Command::ChangePassword { new_password } => out.push_str(new_password.as_str()),
            Command::AddUser {
                serial,
                phone,
                window,
            } => {
                out.push_str(&serial.to_string());
                out.push(SEPARATOR);
                out.push_str(phone.as_str());
                out.push(SEPARATOR);
                if let Some(window) = window {
                    out.push_str(window.start.as_str());
                    out.push(SEPARATOR);
                    out.push_str(window.end.as_str());
                    out.push(SEPARATOR);
                }
            }
            Command::DeleteUser { serial } => {
                out.push_str(&serial.to_string());
                out.push(SEPARATOR);
                out.push(SEPARATOR);
            }
            Command::SetAccessMode { mode } => {
                out.push_str(mode.as_str());
                out.push(SEPARATOR);
            }
            Command::SetLatchTime { latch_time } => {
                out.push_str(&latch_time.to_string());
                out.push(SEPARATOR);
            }
            Command::RelayOn | Command::RelayOff => {}
        }

        out
    }
}
