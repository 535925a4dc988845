use crate::chat_search::domain::models::{SearchRequest, SenderId};
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Emit right away (the exact request was submitted before)
    Emit(SearchRequest),
    /// (Re)arm the debounce timer
    Schedule(Duration),
}

/// Query text and sender filter, with the typed-request cache and debounce
/// bookkeeping. The timer itself belongs to the host; this only says when to
/// arm it and what to emit once it fires.
pub struct QueryInput {
    query: String,
    from: Option<SenderId>,
    typed_requests: Vec<SearchRequest>,
    cache_limit: usize,
    debounce: Duration,
    timer_armed: bool,
}

impl QueryInput {
    pub fn new(debounce: Duration, cache_limit: usize) -> Self {
        Self {
            query: String::new(),
            from: None,
            typed_requests: Vec::new(),
            cache_limit: cache_limit.max(1),
            debounce,
            timer_armed: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    pub fn current_request(&self) -> SearchRequest {
        SearchRequest::new(self.query.clone(), self.from.clone())
    }

    /// Label of the sender chip shown next to the query
    pub fn chip_label(&self) -> Option<String> {
        self.from.as_ref().map(|from| format!("from: {from}"))
    }

    pub fn set_query(&mut self, query: String) -> QueryOutcome {
        self.query = query;
        self.request_search_delayed()
    }

    /// Replace the sender filter. At most one chip exists at a time.
    pub fn set_from(&mut self, from: Option<SenderId>) -> QueryOutcome {
        self.from = from;
        self.request_search_delayed()
    }

    /// Explicit submit (Enter): emit now and remember the request
    pub fn submit(&mut self) -> SearchRequest {
        self.timer_armed = false;
        self.request_search(true)
    }

    /// The debounce timer fired. Nothing to do if a cache hit already emitted.
    pub fn timer_elapsed(&mut self) -> Option<SearchRequest> {
        if !self.timer_armed {
            return None;
        }
        self.timer_armed = false;
        Some(self.request_search(true))
    }

    fn request_search_delayed(&mut self) -> QueryOutcome {
        let request = self.current_request();
        if self.typed_requests.contains(&request) {
            debug!(query = %request.query, "typed request cache hit");
            self.timer_armed = false;
            return QueryOutcome::Emit(self.request_search(false));
        }
        self.timer_armed = true;
        QueryOutcome::Schedule(self.debounce)
    }

    fn request_search(&mut self, cache: bool) -> SearchRequest {
        let request = self.current_request();
        if cache && !self.typed_requests.contains(&request) {
            if self.typed_requests.len() >= self.cache_limit {
                self.typed_requests.remove(0);
            }
            self.typed_requests.push(request.clone());
        }
        request
    }
}
