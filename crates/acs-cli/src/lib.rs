//! Attendance CLI library.
//!
//! Wires configuration, the device layer and the document store into the
//! `acs` subcommands.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DocumentAction};
pub use config::Config;
