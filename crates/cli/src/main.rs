// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rollcall - Event participation and check-in

mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{checkin, event, register, stats, user, volunteer, CliEngine};
use error::CliError;
use output::OutputFormat;
use rollcall_core::{Config, SystemClock, UuidIdGen};
use rollcall_engine::{Engine, EngineConfig};
use rollcall_storage::Store;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Rollcall - Event registration, check-in and volunteer rosters"
)]
struct Cli {
    /// Directory holding the journal, snapshots and config
    #[arg(long, global = true, env = "ROLLCALL_DATA_DIR", default_value = ".rollcall")]
    data_dir: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identity management
    User(user::UserArgs),
    /// Event catalog
    Event(event::EventArgs),
    /// Register a user for an event and print the ticket
    Register { event: String, user: String },
    /// Check a ticket in at an event
    CheckIn { ticket: String, event: String },
    /// List a user's tickets
    Tickets { user: String },
    /// Volunteer provisioning and duties
    Volunteer(volunteer::VolunteerArgs),
    /// Registration, check-in and revenue totals
    Stats {
        /// Only events owned by this organizer
        #[arg(long)]
        organizer: Option<String>,
    },
    /// Write a state snapshot now
    Snapshot,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => eprint!("{}", cli_err),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.data_dir).map_err(CliError::config)?;
    logging::init(&config.log_filter);

    let store =
        Store::open(&cli.data_dir, &config).map_err(|e| CliError::store_open(&cli.data_dir, e))?;
    tracing::debug!(data_dir = %cli.data_dir.display(), next = store.next_sequence(), "store opened");
    let engine: CliEngine = Engine::new(
        store,
        SystemClock,
        UuidIdGen,
        EngineConfig::from(&config),
    );
    let format = cli.format;

    match cli.command {
        Commands::User(args) => user::handle(&engine, args.command, format),
        Commands::Event(args) => event::handle(&engine, args.command, format),
        Commands::Register { event, user } => {
            register::register(&engine, event, user, format).await
        }
        Commands::CheckIn { ticket, event } => checkin::handle(&engine, ticket, event, format),
        Commands::Tickets { user } => register::tickets(&engine, user, format),
        Commands::Volunteer(args) => volunteer::handle(&engine, args.command, format),
        Commands::Stats { organizer } => stats::handle(&engine, organizer, format),
        Commands::Snapshot => {
            engine.snapshot().map_err(CliError::from)?;
            println!("Snapshot written");
            Ok(())
        }
    }
}
