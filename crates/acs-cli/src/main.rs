use std::io::{self, Write};

use acs_cli::commands::{self, documents, events, serve, users};
use acs_cli::{Cli, Commands, Config};
use acs_core::EventQuery;
use acs_store::Collection;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to start async runtime")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so table and JSON output stay clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Some(Commands::Serve { listen }) => {
            runtime()?.block_on(serve::run(&config, listen.as_deref()))?;
        }
        Some(Commands::Events { start, end, json }) => {
            let device = commands::connect(&config)?;
            let query = EventQuery { start, end };
            runtime()?.block_on(events::run(&mut stdout, &device.events, &query, json))?;
        }
        Some(Commands::Users { json }) => {
            let device = commands::connect(&config)?;
            runtime()?.block_on(users::run(&mut stdout, &device.users, json))?;
        }
        Some(Commands::Schedules(action)) => {
            let store = commands::open_store(&config)?;
            documents::run(&mut stdout, &store, Collection::Schedules, &action)?;
        }
        Some(Commands::Employees(action)) => {
            let store = commands::open_store(&config)?;
            documents::run(&mut stdout, &store, Collection::Employees, &action)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    stdout.flush()?;
    Ok(())
}
