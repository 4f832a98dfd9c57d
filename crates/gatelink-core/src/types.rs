use crate::{
    constants::{
        DEFAULT_PASSWORD, LATCH_LATCHED, LATCH_MOMENTARY, LATCH_WIDTH, MAX_SERIAL, MIN_SERIAL,
        MODE_ALL, MODE_AUTHORIZED, PASSWORD_LENGTH, TIMESTAMP_FORMAT, TIMESTAMP_LENGTH,
    },
    error::{ValidationError, ValidationResult as Validated},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Device password (exactly 4 ASCII digits).
///
/// Prefixed to every command sent to the relay.
///
/// # Security
/// Comparison is constant-time and `Debug` never prints the digits.
#[derive(Clone, Eq)]
pub struct Password(String);

impl Password {
    /// Parse a raw password, discarding every non-digit character first.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidPassword` if the remaining digit count is not 4.
    ///
    /// # Example
    /// ```
    /// use gatelink_core::Password;
    ///
    /// assert_eq!(Password::parse("12-34").unwrap().as_str(), "1234");
    /// assert!(Password::parse("123").is_err());
    /// ```
    pub fn parse(raw: &str) -> Validated<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != PASSWORD_LENGTH {
            return Err(ValidationError::InvalidPassword {
                digits: digits.len(),
            });
        }
        Ok(Password(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Password {
    fn default() -> Self {
        Password(DEFAULT_PASSWORD.to_string())
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Password {
    type Err = ValidationError;

    fn from_str(s: &str) -> Validated<Self> {
        Password::parse(s)
    }
}

/// Admin phone number registered with `TEL00`.
///
/// Same shape as [`Phone`]: ASCII digits with an optional leading `+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNumber(String);

impl AdminNumber {
    /// # Errors
    /// - `ValidationError::EmptyAdminNumber` for blank input
    /// - `ValidationError::InvalidAdminNumber` if anything but ASCII digits
    ///   and one leading `+` is present
    pub fn parse(raw: &str) -> Validated<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyAdminNumber);
        }

        let digits = value.strip_prefix('+').unwrap_or(value);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidAdminNumber {
                value: value.to_string(),
            });
        }

        Ok(AdminNumber(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdminNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authorized user slot position (1-200, rendered as 3 zero-padded digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Serial(u8);

impl Serial {
    /// # Errors
    /// Returns `ValidationError::SerialOutOfRange` if `value` is outside 1-200.
    pub fn new(value: u8) -> Validated<Self> {
        if !(MIN_SERIAL..=MAX_SERIAL).contains(&value) {
            return Err(ValidationError::SerialOutOfRange {
                value: value.to_string(),
            });
        }
        Ok(Serial(value))
    }

    /// Parse a decimal serial such as `"16"` or `"016"`.
    ///
    /// # Errors
    /// Returns `ValidationError::SerialOutOfRange` for non-numeric input or
    /// values outside 1-200.
    ///
    /// # Example
    /// ```
    /// use gatelink_core::Serial;
    ///
    /// assert_eq!(Serial::parse("16").unwrap().to_string(), "016");
    /// assert!(Serial::parse("201").is_err());
    /// assert!(Serial::parse("abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Validated<Self> {
        let value = raw.trim();
        let out_of_range = || ValidationError::SerialOutOfRange {
            value: value.to_string(),
        };

        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(out_of_range());
        }

        let number: u32 = value.parse().map_err(|_| out_of_range())?;
        let number = u8::try_from(number).map_err(|_| out_of_range())?;
        Serial::new(number).map_err(|_| out_of_range())
    }

    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Zero-based position in the slot table.
    #[must_use]
    pub fn index(&self) -> usize {
        usize::from(self.0 - MIN_SERIAL)
    }

    /// Every serial the device has, in order.
    pub fn all() -> impl Iterator<Item = Serial> {
        (MIN_SERIAL..=MAX_SERIAL).map(Serial)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl std::str::FromStr for Serial {
    type Err = ValidationError;

    fn from_str(s: &str) -> Validated<Self> {
        Serial::parse(s)
    }
}

/// Phone number of an authorized caller or of the relay unit itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    /// Parse a phone number: digits with an optional leading `+`.
    ///
    /// # Errors
    /// - `ValidationError::EmptyPhone` if the trimmed input is empty
    /// - `ValidationError::InvalidPhone` if any other character is present
    pub fn parse(raw: &str) -> Validated<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }

        let digits = value.strip_prefix('+').unwrap_or(value);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhone {
                value: value.to_string(),
            });
        }

        Ok(Phone(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `YYMMDDHHMM` timestamp bounding an authorized user's time window.
///
/// Only the shape is checked; `2413991299` is accepted because the relay,
/// not this crate, interprets the digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(String);

impl Timestamp {
    /// # Errors
    /// Returns `ValidationError::InvalidTimestampLength` unless the trimmed
    /// input is exactly 10 ASCII digits.
    pub fn parse(raw: &str) -> Validated<Self> {
        let value = raw.trim();
        if value.len() != TIMESTAMP_LENGTH || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidTimestampLength {
                value: value.to_string(),
            });
        }
        Ok(Timestamp(value.to_string()))
    }

    /// Format a calendar instant as `YYMMDDHHMM`.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use gatelink_core::Timestamp;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap().and_hms_opt(8, 0, 0).unwrap();
    /// assert_eq!(Timestamp::from_datetime(&at).as_str(), "2408050800");
    /// ```
    #[must_use]
    pub fn from_datetime(at: &NaiveDateTime) -> Self {
        Timestamp(at.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Interpret the digits as a calendar instant, if they form one.
    #[must_use]
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, TIMESTAMP_FORMAT).ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Start/end pair limiting when an authorized user may control the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        TimeWindow { start, end }
    }

    /// Build an optional window from two optional raw inputs.
    ///
    /// Blank strings count as absent. A window is either fully present or
    /// fully absent.
    ///
    /// # Errors
    /// - `ValidationError::IncompleteTimeWindow` if only one side is supplied
    /// - `ValidationError::InvalidTimestampLength` if a supplied side is malformed
    ///
    /// # Example
    /// ```
    /// use gatelink_core::{TimeWindow, ValidationError};
    ///
    /// assert_eq!(TimeWindow::from_parts(None, Some("")).unwrap(), None);
    /// assert_eq!(
    ///     TimeWindow::from_parts(Some("2408050800"), None),
    ///     Err(ValidationError::IncompleteTimeWindow)
    /// );
    /// ```
    pub fn from_parts(start: Option<&str>, end: Option<&str>) -> Validated<Option<Self>> {
        fn present(side: Option<&str>) -> Option<&str> {
            side.filter(|s| !s.trim().is_empty())
        }

        match (present(start), present(end)) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Ok(Some(TimeWindow::new(
                Timestamp::parse(start)?,
                Timestamp::parse(end)?,
            ))),
            _ => Err(ValidationError::IncompleteTimeWindow),
        }
    }
}

/// Relay latch time in seconds (0-999).
///
/// `0` is a momentary pulse, `999` keeps the relay engaged until the next
/// toggle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatchTime(u16);

impl LatchTime {
    /// Create a latch time, clamping to 999.
    #[must_use]
    pub fn new(seconds: u16) -> Self {
        LatchTime(seconds.min(LATCH_LATCHED))
    }

    /// Parse user input leniently. Never fails.
    ///
    /// Leading digits are read the way a form field would read them
    /// (`"30s"` is 30); negative or non-numeric input becomes 0 and anything
    /// above 999 becomes 999.
    ///
    /// # Example
    /// ```
    /// use gatelink_core::LatchTime;
    ///
    /// assert_eq!(LatchTime::parse("30").to_string(), "030");
    /// assert_eq!(LatchTime::parse("1500").to_string(), "999");
    /// assert_eq!(LatchTime::parse("-5").to_string(), "000");
    /// assert_eq!(LatchTime::parse("abc").to_string(), "000");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim_start();
        let (negative, rest) = match value.as_bytes().first() {
            Some(b'-') => (true, &value[1..]),
            Some(b'+') => (false, &value[1..]),
            _ => (false, value),
        };

        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..end];
        if digits.is_empty() || negative {
            return LatchTime(LATCH_MOMENTARY);
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > LATCH_WIDTH {
            return LatchTime(LATCH_LATCHED);
        }

        LatchTime::new(significant.parse().unwrap_or(LATCH_MOMENTARY))
    }

    #[must_use]
    pub fn as_secs(&self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn is_momentary(&self) -> bool {
        self.0 == LATCH_MOMENTARY
    }

    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.0 == LATCH_LATCHED
    }

    /// Human readable meaning of the value.
    #[must_use]
    pub fn description(&self) -> String {
        match self.0 {
            LATCH_MOMENTARY => "Momentary (0.5s)".to_string(),
            LATCH_LATCHED => "Always ON until next call".to_string(),
            secs => format!("{secs} seconds"),
        }
    }
}

impl fmt::Display for LatchTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = LATCH_WIDTH)
    }
}

/// Who may control the relay by calling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessControlMode {
    /// Only numbers stored in the authorized user table.
    #[default]
    #[serde(rename = "AUT")]
    Authorized,
    /// Any caller.
    #[serde(rename = "ALL")]
    All,
}

impl AccessControlMode {
    /// # Errors
    /// Returns `ValidationError::InvalidMode` unless the trimmed input is
    /// exactly `AUT` or `ALL` (case-sensitive).
    pub fn parse(raw: &str) -> Validated<Self> {
        match raw.trim() {
            MODE_AUTHORIZED => Ok(AccessControlMode::Authorized),
            MODE_ALL => Ok(AccessControlMode::All),
            other => Err(ValidationError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }

    /// Wire keyword.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessControlMode::Authorized => MODE_AUTHORIZED,
            AccessControlMode::All => MODE_ALL,
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            AccessControlMode::Authorized => "Authorized Numbers Only",
            AccessControlMode::All => "All Numbers",
        }
    }
}

impl fmt::Display for AccessControlMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccessControlMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Validated<Self> {
        AccessControlMode::parse(s)
    }
}

/// One slot of the authorized user table.
///
/// Slots are never removed, only cleared: an empty slot keeps its serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedUser {
    pub serial: Serial,
    pub phone: Option<Phone>,
    pub window: Option<TimeWindow>,
}

impl AuthorizedUser {
    /// An empty slot.
    pub fn empty(serial: Serial) -> Self {
        AuthorizedUser {
            serial,
            phone: None,
            window: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
    }

    pub fn clear(&mut self) {
        self.phone = None;
        self.window = None;
    }
}
