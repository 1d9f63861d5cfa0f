//! Application State
//!
//! Immutable state handed to every handler through axum's `State`.

use std::sync::Arc;

use crate::{config::Config, db::Database};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// Store handle; handlers check out their own connection per request.
    pub db: Database,

    pub config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> SharedState {
        Arc::new(Self { db, config })
    }
}
