use std::sync::{atomic::AtomicU64, Arc};

use axum::extract::FromRef;
use deadpool_sqlite::Pool;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
    pub args: Arc<Cli>,
    /// Per-process request counter, logged for diagnostics only
    pub request_counter: Arc<AtomicU64>,
}

impl FromRef<AppState> for Arc<Cli> {
    fn from_ref(state: &AppState) -> Self {
        state.args.clone()
    }
}
