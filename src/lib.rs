pub mod config;
pub mod rest;
pub mod store;

use std::sync::Arc;

use config::TaskdConfig;
use store::TaskStore;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<TaskdConfig>,
    /// The single task store — sole owner of the persisted collection.
    pub store: Arc<TaskStore>,
    pub started_at: std::time::Instant,
}
