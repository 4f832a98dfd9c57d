//! Protocol constants for the GSM relay SMS command set.
//!
//! Every command the relay understands is a single ASCII line made of the
//! current 4-digit password immediately followed by a keyword and its fields:
//!
//! ```text
//! 1234A016#123456#2408050800#2409051000#
//! ^^^^                                    password
//!     ^                                   keyword
//!      ^^^                                serial (3 digits)
//!         ^       ^          ^          ^ field separators
//! ```
//!
//! # Keyword Table
//!
//! | Keyword | Operation | Example |
//! |---------|-----------|---------|
//! | `TEL00` | Register admin number | `1234TEL000469843459#` |
//! | `P` | Change password | `1234P6666` |
//! | `A` | Add or delete an authorized user | `1234A002##` |
//! | `ALL` / `AUT` | Access control mode | `1234ALL#` |
//! | `GOT` | Relay latch time | `1234GOT030#` |
//! | `CC` | Relay ON | `1234CC` |
//! | `DD` | Relay OFF | `1234DD` |
//!
//! # Usage
//!
//! ```
//! use gatelink_core::constants::*;
//!
//! let delete = format!("{}{}{:03}{}{}", DEFAULT_PASSWORD, KEYWORD_USER, 2, SEPARATOR, SEPARATOR);
//! assert_eq!(delete, "1234A002##");
//! ```
//!
//! Changing any of these values breaks compatibility with the relay firmware.

// ============================================================================
// Separators
// ============================================================================

/// Field separator in relay commands.
pub const SEPARATOR: char = '#';

// ============================================================================
// Command Keywords
// ============================================================================

/// Register the admin number.
pub const KEYWORD_REGISTER_ADMIN: &str = "TEL00";

/// Change the device password.
pub const KEYWORD_CHANGE_PASSWORD: &str = "P";

/// Add or delete an authorized user slot.
pub const KEYWORD_USER: &str = "A";

/// Latch time ("GOT" in the relay manual).
pub const KEYWORD_LATCH_TIME: &str = "GOT";

/// Turn the relay output on.
pub const KEYWORD_RELAY_ON: &str = "CC";

/// Turn the relay output off.
pub const KEYWORD_RELAY_OFF: &str = "DD";

/// Access control mode: only authorized numbers may control the relay.
pub const MODE_AUTHORIZED: &str = "AUT";

/// Access control mode: any caller may control the relay.
pub const MODE_ALL: &str = "ALL";

// ============================================================================
// Password
// ============================================================================

/// Number of digits in the device password.
pub const PASSWORD_LENGTH: usize = 4;

/// Factory password of a new relay.
pub const DEFAULT_PASSWORD: &str = "1234";

// ============================================================================
// Authorized User Slots
// ============================================================================

/// Lowest serial (slot position) on the device.
pub const MIN_SERIAL: u8 = 1;

/// Highest serial (slot position) on the device.
pub const MAX_SERIAL: u8 = 200;

/// Rendered width of a serial, zero-padded.
pub const SERIAL_WIDTH: usize = 3;

/// Number of slots in the authorized user table.
pub const SLOT_COUNT: usize = MAX_SERIAL as usize;

// ============================================================================
// Time Window
// ============================================================================

/// Length of a `YYMMDDHHMM` timestamp.
pub const TIMESTAMP_LENGTH: usize = 10;

/// chrono format string matching the `YYMMDDHHMM` layout.
pub const TIMESTAMP_FORMAT: &str = "%y%m%d%H%M";

// ============================================================================
// Latch Time
// ============================================================================

/// Latch time meaning "momentary pulse" (about half a second).
pub const LATCH_MOMENTARY: u16 = 0;

/// Latch time meaning "stay engaged until the next toggle command".
pub const LATCH_LATCHED: u16 = 999;

/// Rendered width of a latch time, zero-padded.
pub const LATCH_WIDTH: usize = 3;
