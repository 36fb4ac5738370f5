//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Attendance reports from access-control terminals.
///
/// Pulls access events from the terminal, keeps only face and
/// fingerprint/card check-ins, and serves them to the attendance frontend.
#[derive(Debug, Parser)]
#[command(name = "acs", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP service and serve the frontend.
    Serve {
        /// Address to listen on, overriding `listen_addr`.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Print attendance records between two dates.
    Events {
        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start: Option<String>,

        /// Last day, YYYY-MM-DD (inclusive).
        #[arg(long)]
        end: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List users enrolled on the device.
    Users {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or replace the stored schedules.
    #[command(subcommand)]
    Schedules(DocumentAction),

    /// Show or replace the stored employee assignments.
    #[command(subcommand)]
    Employees(DocumentAction),
}

/// Operations on a stored JSON document.
#[derive(Debug, Subcommand)]
pub enum DocumentAction {
    /// Print the stored document.
    Show,

    /// Replace the stored document.
    Set {
        /// JSON file to store; stdin when omitted or `-`.
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn events_dates_are_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["acs", "events", "--start", "2025-03-01"]).unwrap();
        match cli.command {
            Some(Commands::Events { start, end, json }) => {
                assert_eq!(start.as_deref(), Some("2025-03-01"));
                assert_eq!(end, None);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn document_set_accepts_optional_file() {
        let cli = Cli::try_parse_from(["acs", "-v", "employees", "set", "-"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Employees(DocumentAction::Set { file: Some(_) }))
        ));

        let cli = Cli::try_parse_from(["acs", "schedules", "set"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Schedules(DocumentAction::Set { file: None }))
        ));
    }
}
