//! Command codec for SMS-controlled GSM relay modules.
//!
//! Turns validated configuration into the exact text commands a relay
//! understands. See [`commands`] for the grammar and [`builder`] for the
//! entry points.

pub mod actions;
pub mod builder;
pub mod commands;
pub mod message;
pub mod transport;
pub mod validation;

pub use actions::apply;
pub use builder::{CommandBuilder, CommandFields, build, preview};
pub use commands::{Command, Operation};
pub use message::RelayCommand;
pub use transport::{Platform, RecordingTransport, SmsDispatch, SmsTransport};
