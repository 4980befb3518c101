// src/state.rs
use crate::{config::Config, store::Store};
use axum::extract::FromRef;
use std::sync::Arc;
use tokio::time::Instant;

/// Everything a handler can reach: the shared store, the immutable config and
/// the process start time for the health endpoint.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> AppState {
        AppState {
            store,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Store {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Arc<Config> {
        state.config.clone()
    }
}
