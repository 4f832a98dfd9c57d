pub mod constants;
pub mod error;
pub mod settings;
pub mod types;

pub use error::{Error, Result, ValidationError, ValidationResult};
pub use settings::SettingsState;
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
