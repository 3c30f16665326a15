//! # Connection Provider
//!
//! Owns the single process-wide database handle.
//!
//! The first successful [`ConnectionProvider::acquire`] connects and caches
//! the handle; every later call clones it. There is no expiry, health check
//! or reconnect. A failed connect caches nothing, so the next call starts
//! from scratch.
//!
//! Concurrent first callers are serialized by a one-time init guard: only
//! one connect is in flight and the others wait for its outcome.

use tokio::sync::OnceCell;

use crate::observability::Event;

use super::errors::StoreResult;
use super::{Connector, Database};

/// Lazily connects through `C` and memoizes the resulting handle
pub struct ConnectionProvider<C: Connector> {
    connector: C,
    database: OnceCell<C::Database>,
}

impl<C: Connector> ConnectionProvider<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            database: OnceCell::new(),
        }
    }

    /// Get the shared database handle, connecting on first use
    pub async fn acquire(&self) -> StoreResult<C::Database> {
        let database = self
            .database
            .get_or_try_init(|| async {
                tracing::info!(event = %Event::StoreConnectStart, "connecting to document store");
                match self.connector.connect().await {
                    Ok(database) => {
                        tracing::info!(event = %Event::StoreConnectComplete, "document store connected");
                        Ok(database)
                    }
                    Err(e) => {
                        tracing::error!(event = %Event::StoreConnectFailed, error = %e, "document store connection failed");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(database.clone())
    }

    /// Shortcut for `acquire()` followed by `collection(name)`
    pub async fn collection(
        &self,
        name: &str,
    ) -> StoreResult<<C::Database as Database>::Collection> {
        Ok(self.acquire().await?.collection(name))
    }

    /// Whether a handle has been cached
    pub fn is_connected(&self) -> bool {
        self.database.initialized()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }
}
