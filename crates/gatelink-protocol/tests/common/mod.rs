//! Common test utilities for integration tests.
//!
//! Helpers come in two kinds:
//!
//! 1. **State helpers** (`state_*`) build a `SettingsState` in a known shape
//! 2. **Assertion helpers** (`assert_*`) build a command and check its text
//!
//! ```ignore
//! use crate::common;
//! use gatelink_protocol::{CommandFields, Operation};
//!
//! let state = common::state_with_unit();
//! common::assert_builds(&state, Operation::RelayOn, &CommandFields::new(), "1234CC");
//! ```

#![allow(dead_code)]

use gatelink_core::{Phone, SettingsState, ValidationError};
use gatelink_protocol::{CommandFields, Operation, RelayCommand, build};

/// Relay SIM number used across scenarios.
pub const UNIT_NUMBER: &str = "+32470000000";

/// Admin number from the reference scenario.
pub const ADMIN_NUMBER: &str = "0469843459";

pub const WINDOW_START: &str = "2408050800";
pub const WINDOW_END: &str = "2409051000";

/// Fresh state: password `1234`, mode `AUT`, latch `000`, no users.
pub fn state_default() -> SettingsState {
    SettingsState::default()
}

/// Fresh state with the unit number configured.
pub fn state_with_unit() -> SettingsState {
    let mut state = SettingsState::default();
    state.set_unit_number(Phone::parse(UNIT_NUMBER).expect("valid unit number"));
    state
}

pub fn build_ok(state: &SettingsState, operation: Operation, fields: &CommandFields) -> RelayCommand {
    build(operation, fields, state)
        .unwrap_or_else(|err| panic!("{operation} should build, got {err}"))
}

/// Assert that `operation` builds exactly `expected`.
pub fn assert_builds(
    state: &SettingsState,
    operation: Operation,
    fields: &CommandFields,
    expected: &str,
) {
    let cmd = build_ok(state, operation, fields);
    assert_eq!(cmd.as_str(), expected, "wrong text for {operation}");
    assert_eq!(cmd.operation(), operation);
}

/// Assert that `operation` is rejected with `expected`.
pub fn assert_rejected(
    state: &SettingsState,
    operation: Operation,
    fields: &CommandFields,
    expected: ValidationError,
) {
    match build(operation, fields, state) {
        Ok(cmd) => panic!("{operation} should be rejected, built {cmd}"),
        Err(err) => assert_eq!(err, expected),
    }
}
