//! Listener address for the todo API.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::net::lookup_host;

/// Where the server listens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface or hostname (default: all interfaces)
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port (default: 8787)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as configured, before resolution
    pub fn socket_addr(&self) -> String {
        self.to_string()
    }

    /// Resolve the host to the first matching socket address.
    ///
    /// Accepts IP literals as well as names such as `localhost`.
    pub async fn resolve(&self) -> io::Result<SocketAddr> {
        if self.host.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "server host must not be empty",
            ));
        }

        lookup_host((self.host.as_str(), self.port))
            .await?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' did not resolve to any address", self),
                )
            })
    }
}

impl fmt::Display for HttpServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:8787");
    }

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        let addr = config.resolve().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 9000);
    }

    #[tokio::test]
    async fn test_empty_host_is_rejected() {
        let config = HttpServerConfig {
            host: String::new(),
            port: 80,
        };
        assert_eq!(
            config.resolve().await.unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_partial_json_keeps_default_host() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 3000}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }
}
