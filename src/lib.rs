pub mod backend;
pub mod chat_search;
pub mod logging;
pub mod schemas;

use chat_search::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE, TYPED_CACHE_LIMIT};

/// Tunables shared by both hosts
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub page_size: usize,
    pub debounce_ms: u64,
    pub typed_cache_limit: usize,
    /// Artificial delay of the bundled backend, per page
    pub latency_ms: u64,
    pub verbose: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            typed_cache_limit: TYPED_CACHE_LIMIT,
            latency_ms: 0,
            verbose: false,
        }
    }
}

pub use backend::{LocalExportBackend, SearchBackend};
pub use chat_search::application::conversation_store::{ConversationStore, ExportStore};
pub use chat_search::domain::models::{MessageRef, SearchRequest, SenderId};
pub use chat_search::{HeadlessSearch, InteractiveSearch};
pub use schemas::{ChatMessage, ConversationHeader, ConversationKind};
