//! Application state shared across handlers.

use std::sync::Arc;

use curio_core::SearchProvider;
use curio_db::Database;

use crate::services::Library;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database context with all repositories.
    pub db: Database,
    /// Save/unsave/update-tags orchestration service.
    pub library: Library,
    /// Search/Summary provider client.
    pub search: Arc<dyn SearchProvider>,
}
