use clap::{Args, Parser, Subcommand};
use gatelink_protocol::{CommandFields, Operation, Platform};
use std::path::PathBuf;

/// Configure an SMS-controlled GSM relay.
#[derive(Parser, Debug)]
#[command(name = "gatelink", version)]
pub struct Cli {
    /// JSON file holding the relay settings
    #[arg(long, env = "GATELINK_STORE", default_value = "gatelink.json", global = true)]
    pub store: PathBuf,

    /// Shape of the printed sms: link (ios, android, other)
    #[arg(long, env = "GATELINK_PLATFORM", default_value = "other", global = true)]
    pub platform: Platform,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the admin number (defaults to the stored one)
    RegisterAdmin { admin_number: Option<String> },

    /// Change the relay password
    ChangePassword { new_password: String },

    /// Store a phone number in a slot
    AddUser {
        serial: String,
        phone: String,
        /// Window start, YYMMDDHHMM
        #[arg(long)]
        start: Option<String>,
        /// Window end, YYMMDDHHMM
        #[arg(long)]
        end: Option<String>,
    },

    /// Clear a slot
    DeleteUser { serial: String },

    /// Set the access control mode (AUT or ALL)
    SetMode { mode: String },

    /// Set the latch time in seconds (0 momentary, 999 latched)
    SetLatch {
        #[arg(allow_hyphen_values = true)]
        seconds: String,
    },

    /// Switch the relay on
    On,

    /// Switch the relay off
    Off,

    /// Set the phone number of the relay's SIM card
    SetUnit { number: String },

    /// Show what an operation would send without validating or saving
    Preview {
        operation: Operation,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Print the stored settings
    Status,
}

/// Raw fields for `preview`.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub admin_number: Option<String>,
    #[arg(long)]
    pub new_password: Option<String>,
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub latch_time: Option<String>,
}

impl FieldArgs {
    pub fn to_fields(&self) -> CommandFields {
        let mut fields = CommandFields::new();
        if let Some(v) = &self.admin_number {
            fields = fields.admin_number(v.as_str());
        }
        if let Some(v) = &self.new_password {
            fields = fields.new_password(v.as_str());
        }
        if let Some(v) = &self.serial {
            fields = fields.serial(v.as_str());
        }
        if let Some(v) = &self.phone {
            fields = fields.phone(v.as_str());
        }
        if let Some(v) = &self.start {
            fields = fields.start(v.as_str());
        }
        if let Some(v) = &self.end {
            fields = fields.end(v.as_str());
        }
        if let Some(v) = &self.mode {
            fields = fields.mode(v.as_str());
        }
        if let Some(v) = &self.latch_time {
            fields = fields.latch_time(v.as_str());
        }
        fields
    }
}

impl Commands {
    /// Relay operation and raw fields for subcommands that send a command.
    pub fn relay_operation(&self) -> Option<(Operation, CommandFields)> {
        let op = match self {
            Commands::RegisterAdmin { admin_number } => {
                let fields = match admin_number {
                    Some(admin) => CommandFields::new().admin_number(admin.as_str()),
                    None => CommandFields::new(),
                };
                (Operation::RegisterAdmin, fields)
            }
            Commands::ChangePassword { new_password } => (
                Operation::ChangePassword,
                CommandFields::new().new_password(new_password.as_str()),
            ),
            Commands::AddUser {
                serial,
                phone,
                start,
                end,
            } => {
                let mut fields = CommandFields::new()
                    .serial(serial.as_str())
                    .phone(phone.as_str());
                if let Some(start) = start {
                    fields = fields.start(start.as_str());
                }
                if let Some(end) = end {
                    fields = fields.end(end.as_str());
                }
                (Operation::AddUser, fields)
            }
            Commands::DeleteUser { serial } => (
                Operation::DeleteUser,
                CommandFields::new().serial(serial.as_str()),
            ),
            Commands::SetMode { mode } => (
                Operation::SetAccessMode,
                CommandFields::new().mode(mode.as_str()),
            ),
            Commands::SetLatch { seconds } => (
                Operation::SetLatchTime,
                CommandFields::new().latch_time(seconds.as_str()),
            ),
            Commands::On => (Operation::RelayOn, CommandFields::new()),
            Commands::Off => (Operation::RelayOff, CommandFields::new()),
            Commands::SetUnit { .. } | Commands::Preview { .. } | Commands::Status => return None,
        };
        Some(op)
    }
}
