//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::stores::Storage;

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store for every domain model.
    pub store: Arc<dyn Storage>,
}

impl AppState {
    /// Create a new [AppState] that keeps its data in `store`.
    ///
    /// The store must be ready to use, e.g. a [crate::SQLiteStore] whose
    /// tables were created with [crate::initialize_db].
    pub fn new(store: impl Storage + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
