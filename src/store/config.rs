//! Document store configuration
//!
//! Connection string, database/collection names, and pool settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string (default: "mongodb://localhost:27017")
    #[serde(default = "default_connection_string")]
    pub connection_string: String,

    /// Database holding the todo collection (default: "todos_db")
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Collection name (default: "todos")
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Upper bound on pooled connections (default: 10)
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,

    /// Lower bound on pooled connections (default: 2)
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,

    /// How long to wait for a reachable server (default: 5000ms)
    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,
}

fn default_connection_string() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "todos_db".to_string()
}

fn default_collection_name() -> String {
    "todos".to_string()
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_min_pool_size() -> u32 {
    2
}

fn default_server_selection_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_string: default_connection_string(),
            database_name: default_database_name(),
            collection_name: default_collection_name(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            server_selection_timeout_ms: default_server_selection_timeout_ms(),
        }
    }
}

impl StoreConfig {
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.server_selection_timeout_ms)
    }
}
