//! CLI command implementations

use std::path::Path;

use crate::config::ServiceConfig;
use crate::http_server::TodoServer;
use crate::observability::{init_logging, log_event, Event};
use crate::store::{ConnectionProvider, MemoryConnector, MongoConnector};

use super::args::{Cli, Command, StoreBackend};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            store,
        } => serve(config.as_deref(), host, port, store),
        Command::Ping { config } => ping(config.as_deref()),
    }
}

/// Resolve configuration and apply command-line overrides
fn load_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<ServiceConfig> {
    let mut config = ServiceConfig::resolve(path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server and block until shutdown.
///
/// The store is not contacted here; the first request connects.
pub fn serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    backend: StoreBackend,
) -> CliResult<()> {
    let config = load_config(config_path, host, port)?;
    init_logging(&config.logging);
    log_event(Event::BootStart);
    tracing::info!(
        event = %Event::ConfigLoaded,
        addr = %config.server.socket_addr(),
        database = %config.store.database_name,
        collection = %config.store.collection_name,
        backend = ?backend,
        "configuration loaded"
    );

    let collection = config.store.collection_name.clone();
    let server = match backend {
        StoreBackend::Mongo => TodoServer::new(
            config.server.clone(),
            MongoConnector::new(config.store.clone()),
            collection,
        ),
        StoreBackend::Memory => {
            TodoServer::new(config.server.clone(), MemoryConnector::new(), collection)
        }
    };

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Connect to MongoDB once, report, and exit
pub fn ping(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path, None, None)?;
    init_logging(&config.logging);

    let provider = ConnectionProvider::new(MongoConnector::new(config.store.clone()));
    runtime()?.block_on(provider.acquire())?;

    println!(
        "connected to database '{}' ({})",
        config.store.database_name, config.store.collection_name
    );
    Ok(())
}
