//! Field validators for relay commands.
//!
//! Each validator takes one raw input string (as typed into a form) and
//! returns the normalized value that will appear on the wire, or the
//! [`ValidationError`] explaining why the input cannot be used. None of them
//! has side effects, and normalization is idempotent:
//!
//! ```
//! use gatelink_protocol::validation::validate_serial;
//!
//! let once = validate_serial("16").unwrap();
//! assert_eq!(once, "016");
//! assert_eq!(validate_serial(&once).unwrap(), once);
//! ```
//!
//! | Field | Rule | Failure |
//! |-------|------|---------|
//! | Password | keep digits, require exactly 4 | `InvalidPassword` |
//! | Serial | integer 1-200, 3-digit padding | `SerialOutOfRange` |
//! | Phone | digits with optional leading `+` | `EmptyPhone` / `InvalidPhone` |
//! | Timestamp | exactly 10 digits, no calendar check | `InvalidTimestampLength` |
//! | Latch time | clamp into 0-999, 3-digit padding | never fails |
//! | Access mode | `AUT` or `ALL` | `InvalidMode` |
//! | Admin number | digits with optional leading `+` | `EmptyAdminNumber` / `InvalidAdminNumber` |
//!
//! Latch time is the one field that clamps instead of rejecting: `1500`
//! yields `999`.

use gatelink_core::{
    AccessControlMode, AdminNumber, LatchTime, Password, Phone, Serial, TimeWindow, Timestamp,
    ValidationError, ValidationResult,
};

/// Validate a password or new password.
///
/// Non-digit characters are discarded before the length check.
///
/// # Errors
/// Returns `ValidationError::InvalidPassword` if the digit count is not 4.
///
/// # Examples
/// ```
/// use gatelink_protocol::validation::validate_password;
///
/// assert_eq!(validate_password("6666").unwrap(), "6666");
/// assert_eq!(validate_password(" 6 6 6 6").unwrap(), "6666");
/// assert!(validate_password("666").is_err());
/// ```
pub fn validate_password(raw: &str) -> ValidationResult<String> {
    Password::parse(raw).map(|p| p.as_str().to_string())
}

/// Validate a slot serial and render it zero-padded to 3 digits.
///
/// # Errors
/// Returns `ValidationError::SerialOutOfRange` for non-numeric input or
/// values outside 1-200.
pub fn validate_serial(raw: &str) -> ValidationResult<String> {
    Serial::parse(raw).map(|s| s.to_string())
}

/// Validate a caller phone number.
///
/// # Errors
/// Returns `ValidationError::EmptyPhone` for blank input and
/// `ValidationError::InvalidPhone` for characters other than digits and a
/// leading `+`.
pub fn validate_phone(raw: &str) -> ValidationResult<String> {
    Phone::parse(raw).map(|p| p.as_str().to_string())
}

/// Validate a `YYMMDDHHMM` window boundary.
///
/// # Errors
/// Returns `ValidationError::InvalidTimestampLength` unless the input is
/// exactly 10 digits.
///
/// # Examples
/// ```
/// use gatelink_protocol::validation::validate_timestamp;
///
/// assert_eq!(validate_timestamp("2408050800").unwrap(), "2408050800");
/// assert!(validate_timestamp("24080508").is_err());
/// ```
pub fn validate_timestamp(raw: &str) -> ValidationResult<String> {
    Timestamp::parse(raw).map(|t| t.as_str().to_string())
}

/// Normalize a latch time to 3 zero-padded digits, clamping into 0-999.
///
/// # Examples
/// ```
/// use gatelink_protocol::validation::validate_latch_time;
///
/// assert_eq!(validate_latch_time("30"), "030");
/// assert_eq!(validate_latch_time("1500"), "999");
/// assert_eq!(validate_latch_time("-5"), "000");
/// assert_eq!(validate_latch_time("soon"), "000");
/// ```
pub fn validate_latch_time(raw: &str) -> String {
    LatchTime::parse(raw).to_string()
}

/// Validate an access control mode keyword.
///
/// # Errors
/// Returns `ValidationError::InvalidMode` unless the input is `AUT` or `ALL`.
pub fn validate_access_mode(raw: &str) -> ValidationResult<String> {
    AccessControlMode::parse(raw).map(|m| m.as_str().to_string())
}

/// Validate an admin number.
///
/// # Errors
/// Returns `ValidationError::EmptyAdminNumber` for blank input and
/// `ValidationError::InvalidAdminNumber` for anything that is not a dial
/// string of ASCII digits.
pub fn validate_admin_number(raw: &str) -> ValidationResult<String> {
    AdminNumber::parse(raw).map(|a| a.as_str().to_string())
}

/// Validate the two optional sides of a time window together.
///
/// Returns `None` when both sides are blank.
///
/// # Errors
/// Returns `ValidationError::IncompleteTimeWindow` when exactly one side is
/// present, or the timestamp error of a malformed side.
pub fn validate_time_window(
    start: Option<&str>,
    end: Option<&str>,
) -> ValidationResult<Option<(String, String)>> {
    let window = TimeWindow::from_parts(start, end)?;
    Ok(window.map(|w| (w.start.as_str().to_string(), w.end.as_str().to_string())))
}

/// Name of the form field a validation failure belongs to.
pub fn field_name(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::InvalidPassword { .. } => "password",
        ValidationError::SerialOutOfRange { .. } => "serial",
        ValidationError::EmptyPhone | ValidationError::InvalidPhone { .. } => "phone",
        ValidationError::InvalidTimestampLength { .. } | ValidationError::IncompleteTimeWindow => {
            "window"
        }
        ValidationError::InvalidMode { .. } => "mode",
        ValidationError::EmptyAdminNumber | ValidationError::InvalidAdminNumber { .. } => {
            "admin_number"
        }
    }
}
