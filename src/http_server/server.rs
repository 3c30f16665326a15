//! # HTTP Server
//!
//! Binds the todo router to a TCP listener and serves until Ctrl-C.

use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::observability::{log_event, Event};
use crate::store::Connector;

use super::config::HttpServerConfig;
use super::handlers::TodoState;
use super::router::build_router;

/// HTTP server for the todo API
pub struct TodoServer {
    config: HttpServerConfig,
    router: Router,
}

impl TodoServer {
    /// Create a server for `connector`, serving the named collection
    pub fn new<C: Connector>(
        config: HttpServerConfig,
        connector: C,
        collection_name: impl Into<String>,
    ) -> Self {
        let state = Arc::new(TodoState::new(connector, collection_name));
        Self {
            config,
            router: build_router(state),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until a shutdown signal arrives
    pub async fn start(self) -> io::Result<()> {
        let addr = self.config.resolve().await?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(event = %Event::Serving, addr = %listener.local_addr()?, "todo API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c, shutting down");
    }
    log_event(Event::ShutdownStart);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConnector;

    #[test]
    fn test_server_creation() {
        let server = TodoServer::new(HttpServerConfig::default(), MemoryConnector::new(), "todos");
        assert_eq!(server.socket_addr(), "0.0.0.0:8787");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = TodoServer::new(config, MemoryConnector::new(), "todos");
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_blank_host_is_rejected() {
        let config = HttpServerConfig {
            host: "  ".to_string(),
            port: 1,
        };
        let server = TodoServer::new(config, MemoryConnector::new(), "todos");
        let err = server.start().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
