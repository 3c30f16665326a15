//! CLI argument definitions using clap
//!
//! Commands:
//! - todo-api serve [--config <path>] [--host <host>] [--port <port>] [--store mongo|memory]
//! - todo-api ping [--config <path>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// todo-api - HTTP CRUD service for todos backed by MongoDB
#[derive(Parser, Debug)]
#[command(name = "todo-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Which store backend to serve from
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// MongoDB via the configured connection string
    #[default]
    Mongo,
    /// Process-local store, lost on exit
    Memory,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config and TODO_API_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and TODO_API_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Store backend
        #[arg(long, value_enum, default_value_t = StoreBackend::Mongo)]
        store: StoreBackend,
    },

    /// Connect to the configured store once and exit
    Ping {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
