use crate::store::KvStore;
use crate::words::WordCursor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub words: WordCursor,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            words: WordCursor::new(Arc::clone(&store)),
            store,
        }
    }
}
