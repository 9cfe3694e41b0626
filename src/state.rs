use std::sync::Arc;

use crate::config::Config;
use crate::repository::{DynRepository, SqliteRepository};
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub repo: DynRepository,
    pub config: Config,
}

impl AppState {
    /// Builds the state over the SQLite-backed repository.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            repo: Arc::new(SqliteRepository::new(pool)),
            config,
        }
    }
}

impl FromRef<AppState> for DynRepository {
    fn from_ref(state: &AppState) -> Self {
        state.repo.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
