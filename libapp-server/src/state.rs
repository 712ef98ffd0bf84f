//! Application state

use crate::error::{ApiError, ApiResult};
use anyhow::Result;
use libapp_core::{AppConfig, CatalogService};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state
///
/// Handlers take the read lock for queries. Every mutation goes through
/// [`AppState::mutate`], so a borrow or return checks and updates a book
/// without another request interleaving.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogService>>,
}

impl AppState {
    /// Open the catalog described by `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        let service = CatalogService::open(config)?;
        Ok(Self::from_service(service))
    }

    /// Wrap an already constructed service
    pub fn from_service(service: CatalogService) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(service)),
        }
    }

    /// Run a mutation under the write lock on the blocking pool
    ///
    /// Mutations may write the catalog file synchronously, so they stay off
    /// the async workers. The guard moves with the closure and is released
    /// when it finishes.
    pub async fn mutate<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&mut CatalogService) -> libapp_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut catalog = Arc::clone(&self.catalog).write_owned().await;
        let result = tokio::task::spawn_blocking(move || op(&mut *catalog))
            .await
            .map_err(|e| ApiError::Internal(format!("Catalog task failed: {e}")))?;
        Ok(result?)
    }
}
