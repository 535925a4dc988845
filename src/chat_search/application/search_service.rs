use crate::backend::SearchBackend;
use crate::chat_search::domain::models::{FoundMessages, PageRequest, PageResponse};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    pub fn search(&self, request: &PageRequest) -> Result<PageResponse> {
        let started = std::time::Instant::now();
        let found = self.backend.search(request)?;
        info!(
            source = ?request.source,
            generation = request.generation,
            token = %request.token,
            returned = found.messages.len(),
            total = found.total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "page loaded"
        );
        Ok(PageResponse::for_request(request, found))
    }

    /// Backend failures surface as an empty, exhausted page
    pub fn search_or_empty(&self, request: &PageRequest) -> PageResponse {
        match self.search(request) {
            Ok(response) => response,
            Err(e) => {
                warn!(source = ?request.source, error = %e, "search failed");
                PageResponse::for_request(request, FoundMessages::empty())
            }
        }
    }
}
