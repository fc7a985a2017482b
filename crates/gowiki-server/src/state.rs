//! Application state.
//!
//! Shared, read-only state for all request handlers.

use std::sync::Arc;

use gowiki_storage::Storage;

use crate::templates::Templates;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page store.
    pub(crate) storage: Arc<dyn Storage>,
    /// Templates parsed at startup.
    pub(crate) templates: Templates,
    /// Title that `/` redirects to.
    pub(crate) front_page: String,
}
