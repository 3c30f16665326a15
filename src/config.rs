//! Service configuration
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. JSON config file (`--config`)
//! 3. environment (`MONGODB_URI`, `DATABASE_NAME`, `COLLECTION_NAME`,
//!    `TODO_API_HOST`, `TODO_API_PORT`, `TODO_API_LOG_LEVEL`)
//! 4. command-line flags (applied by the CLI)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;
use crate::store::StoreConfig;

pub const ENV_CONNECTION_STRING: &str = "MONGODB_URI";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_COLLECTION_NAME: &str = "COLLECTION_NAME";
pub const ENV_HOST: &str = "TODO_API_HOST";
pub const ENV_PORT: &str = "TODO_API_PORT";
pub const ENV_LOG_LEVEL: &str = "TODO_API_LOG_LEVEL";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Defaults, then the optional file, then the process environment
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables.
    ///
    /// `lookup` stands in for `std::env::var` so this stays testable.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(ENV_CONNECTION_STRING) {
            self.store.connection_string = uri;
        }
        if let Some(name) = lookup(ENV_DATABASE_NAME) {
            self.store.database_name = name;
        }
        if let Some(name) = lookup(ENV_COLLECTION_NAME) {
            self.store.collection_name = name;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_PORT,
                value: port,
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.connection_string.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.connection_string must not be empty".to_string(),
            ));
        }
        if self.store.database_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.database_name must not be empty".to_string(),
            ));
        }
        if self.store.collection_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.collection_name must not be empty".to_string(),
            ));
        }
        if self.store.max_pool_size == 0 {
            return Err(ConfigError::Invalid(
                "store.max_pool_size must be > 0".to_string(),
            ));
        }
        if self.store.min_pool_size > self.store.max_pool_size {
            return Err(ConfigError::Invalid(format!(
                "store.min_pool_size ({}) exceeds store.max_pool_size ({})",
                self.store.min_pool_size, self.store.max_pool_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        ServiceConfig::default().validate().unwrap();
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_env(env(&[
                (ENV_CONNECTION_STRING, "mongodb://db.internal:27017"),
                (ENV_DATABASE_NAME, "prod"),
                (ENV_COLLECTION_NAME, "items"),
                (ENV_PORT, "9000"),
            ]))
            .unwrap();

        assert_eq!(config.store.connection_string, "mongodb://db.internal:27017");
        assert_eq!(config.store.database_name, "prod");
        assert_eq!(config.store.collection_name, "items");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_env() {
        let mut config = ServiceConfig::default();
        let err = config.apply_env(env(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "TODO_API_PORT", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server": {{"port": 3000}}, "store": {{"collection_name": "tasks"}}}}"#
        )
        .unwrap();

        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.collection_name, "tasks");
        assert_eq!(config.store.database_name, "todos_db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServiceConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_pool_bounds() {
        let mut config = ServiceConfig::default();
        config.store.min_pool_size = 20;
        assert!(config.validate().is_err());

        config.store.min_pool_size = 0;
        config.store.max_pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_names() {
        let mut config = ServiceConfig::default();
        config.store.collection_name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
