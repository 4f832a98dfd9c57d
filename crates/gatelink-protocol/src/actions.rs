//! Build a command and record the matching local change.
//!
//! The command is always rendered against the state as it was before the
//! mutation, so a password change is sent with the old password as prefix and
//! every later command uses the new one. Nothing is rolled back if the relay
//! never receives the message.

use crate::{
    builder::{CommandBuilder, CommandFields},
    commands::{Command, Operation},
    message::RelayCommand,
};
use gatelink_core::{Result, SettingsState};
use tracing::debug;

/// Build the command for `operation`, then mutate `state` to match.
///
/// # Errors
/// Returns `Error::Validation` when a field is rejected. `state` is left
/// untouched in that case.
///
/// # Example
/// ```
/// use gatelink_core::SettingsState;
/// use gatelink_protocol::{apply, build, CommandFields, Operation};
///
/// let mut state = SettingsState::default();
/// let sent = apply(
///     Operation::ChangePassword,
///     &CommandFields::new().new_password("6666"),
///     &mut state,
/// )
/// .unwrap();
/// assert_eq!(sent.as_str(), "1234P6666");
///
/// let next = build(Operation::RelayOn, &CommandFields::new(), &state).unwrap();
/// assert_eq!(next.as_str(), "6666CC");
/// ```
pub fn apply(
    operation: Operation,
    fields: &CommandFields,
    state: &mut SettingsState,
) -> Result<RelayCommand> {
    let builder = CommandBuilder::new(state);
    let command = builder.resolve(operation, fields)?;
    let rendered = builder.render(&command);

    debug!(operation = %operation, "Applying relay command to local state");

    match command {
        Command::RegisterAdmin { admin_number } => state.set_admin_number(admin_number),
        Command::ChangePassword { new_password } => state.set_password(new_password),
        Command::AddUser {
            serial,
            phone,
            window,
        } => state.upsert_user(serial, phone, window),
        Command::DeleteUser { serial } => state.clear_user(serial),
        Command::SetAccessMode { mode } => state.set_access_control_mode(mode),
        Command::SetLatchTime { latch_time } => state.set_latch_time(latch_time),
        Command::RelayOn | Command::RelayOff => {}
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatelink_core::{AccessControlMode, Error, Serial, ValidationError};

    #[test]
    fn test_apply_change_password_uses_old_prefix() {
        let mut state = SettingsState::default();
        let cmd = apply(
            Operation::ChangePassword,
            &CommandFields::new().new_password("6666"),
            &mut state,
        )
        .unwrap();

        assert_eq!(cmd.as_str(), "1234P6666");
        assert_eq!(state.password().as_str(), "6666");
    }

    #[test]
    fn test_apply_add_and_delete_user() {
        let mut state = SettingsState::default();
        let serial = Serial::new(16).unwrap();

        apply(
            Operation::AddUser,
            &CommandFields::new()
                .serial("16")
                .phone("123456")
                .window("2408050800", "2409051000"),
            &mut state,
        )
        .unwrap();
        let user = state.user(serial);
        assert_eq!(user.phone.as_ref().unwrap().as_str(), "123456");
        assert!(user.window.is_some());

        let cmd = apply(
            Operation::DeleteUser,
            &CommandFields::new().serial("16"),
            &mut state,
        )
        .unwrap();
        assert_eq!(cmd.as_str(), "1234A016##");
        assert!(state.user(serial).is_empty());
    }

    #[test]
    fn test_apply_rejection_leaves_state_untouched() {
        let mut state = SettingsState::default();
        let before = state.clone();

        let err = apply(
            Operation::AddUser,
            &CommandFields::new()
                .serial("16")
                .phone("123456")
                .start("2408050800"),
            &mut state,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::IncompleteTimeWindow)
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_mode_and_relay() {
        let mut state = SettingsState::default();
        apply(
            Operation::SetAccessMode,
            &CommandFields::new().mode("ALL"),
            &mut state,
        )
        .unwrap();
        assert_eq!(state.access_control_mode(), AccessControlMode::All);

        let before = state.clone();
        let cmd = apply(Operation::RelayOn, &CommandFields::new(), &mut state).unwrap();
        assert_eq!(cmd.as_str(), "1234CC");
        assert_eq!(state, before);
    }
}
