use std::sync::Arc;

use anyhow::anyhow;
use tracing::error;

use batepapo_db::ChatStore;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn ChatStore>,
}

impl AppStateInner {
    pub fn new(store: Arc<dyn ChatStore>) -> AppState {
        Arc::new(Self { store })
    }

    /// Run blocking store work off the async runtime.
    pub async fn with_store<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn ChatStore) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Storage(anyhow!("store task failed: {}", e))
            })?
    }
}
