//! CLI module for todo-api
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP server
//! - ping: Check that the configured store is reachable

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, StoreBackend};
pub use commands::{ping, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
