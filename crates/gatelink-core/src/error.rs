use thiserror::Error;

/// Rejection raised when a raw field cannot become part of a relay command.
///
/// Every variant is recoverable by the caller: the action is rejected and no
/// command is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password must be exactly 4 digits, got {digits} digit(s)")]
    InvalidPassword { digits: usize },

    #[error("Serial must be a number between 1 and 200, got '{value}'")]
    SerialOutOfRange { value: String },

    #[error("Phone number is empty")]
    EmptyPhone,

    #[error("Phone number may only contain digits and a leading '+', got '{value}'")]
    InvalidPhone { value: String },

    #[error("Timestamp must be 10 digits (YYMMDDHHMM), got '{value}'")]
    InvalidTimestampLength { value: String },

    #[error("Access control mode must be AUT or ALL, got '{value}'")]
    InvalidMode { value: String },

    #[error("Time window needs both a start and an end")]
    IncompleteTimeWindow,

    #[error("Admin number is empty")]
    EmptyAdminNumber,

    #[error("Admin number may only contain digits and a leading '+', got '{value}'")]
    InvalidAdminNumber { value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unit number is not configured")]
    MissingUnitNumber,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result of a single field or command validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
