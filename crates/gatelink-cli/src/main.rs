mod args;

use anyhow::{Context, Result, anyhow};
use args::{Cli, Commands};
use clap::Parser;
use gatelink_core::{Error, Phone, SettingsState};
use gatelink_protocol::{
    CommandFields, Operation, Platform, RelayCommand, SmsDispatch, SmsTransport, apply, preview,
    validation::field_name,
};
use gatelink_storage::{FileStore, KeyValueStore, SettingsRepository, StoreConfig};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prints each dispatch with the `sms:` link a phone would open.
struct StdoutTransport {
    platform: Platform,
}

impl SmsTransport for StdoutTransport {
    type Error = std::io::Error;

    fn send(&mut self, dispatch: &SmsDispatch) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "To:      {}", dispatch.destination)?;
        writeln!(out, "Command: {}", dispatch.command)?;
        writeln!(out, "Link:    {}", dispatch.uri(self.platform))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let store = FileStore::open(StoreConfig::new(&cli.store))
        .with_context(|| format!("Failed to open settings store {}", cli.store.display()))?;
    let mut repo = SettingsRepository::new(store);
    let mut state = repo.load()?;

    if let Some((operation, fields)) = cli.command.relay_operation() {
        let mut transport = StdoutTransport {
            platform: cli.platform,
        };
        send_and_persist(&mut repo, &mut state, operation, &fields, &mut transport)?;
        return Ok(());
    }

    match cli.command {
        Commands::SetUnit { number } => {
            state.set_unit_number(Phone::parse(&number)?);
            repo.save_unit_number(&state)?;
            println!("Unit number: {number}");
        }
        Commands::Preview { operation, fields } => {
            println!("Will send: {}", preview(operation, &fields.to_fields(), &state));
        }
        Commands::Status => print_status(&state),
        _ => {}
    }

    Ok(())
}

/// Build `operation`, hand it to `transport`, then save what it changed.
///
/// Nothing is written unless the command was sent.
fn send_and_persist<S, T>(
    repo: &mut SettingsRepository<S>,
    state: &mut SettingsState,
    operation: Operation,
    fields: &CommandFields,
    transport: &mut T,
) -> Result<RelayCommand>
where
    S: KeyValueStore,
    T: SmsTransport,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    let command = apply(operation, fields, state).map_err(|e| match e {
        Error::Validation(v) => anyhow!("Invalid {}: {}", field_name(&v), v),
        other => other.into(),
    })?;
    let dispatch = SmsDispatch::for_state(state, command)
        .context("Set the relay's number first with `gatelink set-unit <NUMBER>`")?;

    transport.send(&dispatch)?;
    persist(repo, operation, state)?;
    Ok(dispatch.command)
}

// Write only what the operation changed.
fn persist<S: KeyValueStore>(
    repo: &mut SettingsRepository<S>,
    operation: Operation,
    state: &SettingsState,
) -> Result<()> {
    if operation.is_relay_control() {
        return Ok(());
    }
    match operation {
        Operation::RegisterAdmin => repo.save_admin_number(state)?,
        Operation::ChangePassword => repo.save_password(state)?,
        Operation::AddUser | Operation::DeleteUser => repo.save_authorized_users(state)?,
        Operation::SetAccessMode | Operation::SetLatchTime => repo.save_relay_settings(state)?,
        Operation::RelayOn | Operation::RelayOff => {}
    }
    info!(operation = %operation, "Settings persisted");
    Ok(())
}

fn print_status(state: &SettingsState) {
    let unit = state
        .unit_number()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "not set".to_string());
    let admin = state
        .admin_number()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "not set".to_string());

    println!("Unit number:    {unit}");
    println!("Admin number:   {admin}");
    println!("Password:       {}", state.password());
    println!(
        "Access control: {}",
        state.access_control_mode().description()
    );
    println!("Latch time:     {}", state.latch_time().description());

    println!(
        "Authorized users ({}):",
        state.occupied_users().count()
    );
    for user in state.occupied_users() {
        let phone = user.phone.as_ref().map(|p| p.as_str()).unwrap_or_default();
        match &user.window {
            Some(window) => println!("  {}  {}  {} -> {}", user.serial, phone, window.start, window.end),
            None => println!("  {}  {}", user.serial, phone),
        }
    }
}
