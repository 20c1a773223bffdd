use std::sync::Arc;

use crate::store::Store;

/// Process-wide state: the record store opened at startup and the configured
/// signing secret. Built once in `main`, shared with every request through
/// axum's `State`, released on shutdown.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub token_secret: String,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, token_secret: impl Into<String>) -> Self {
        Self { store, token_secret: token_secret.into() }
    }
}
