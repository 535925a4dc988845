use crate::chat_search::domain::models::{
    ConversationId, PageRequest, PageResponse, PageToken, SearchRequest, SearchSource,
};
use tracing::debug;

/// Client-side pagination state for one searchable conversation.
///
/// Remembers the running query, the cursor of the next page and the request
/// currently in flight. The transport itself is stateless; every page it
/// answers is checked against this state before it is merged.
pub struct MessagesSearch {
    source: SearchSource,
    conversation: ConversationId,
    page_size: usize,
    request: Option<SearchRequest>,
    generation: u64,
    next_token: Option<PageToken>,
    in_flight: Option<PageToken>,
}

impl MessagesSearch {
    pub fn new(source: SearchSource, conversation: ConversationId, page_size: usize) -> Self {
        Self {
            source,
            conversation,
            page_size: page_size.max(1),
            request: None,
            generation: 0,
            next_token: None,
            in_flight: None,
        }
    }

    pub fn conversation(&self) -> ConversationId {
        self.conversation
    }

    pub fn source(&self) -> SearchSource {
        self.source
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cursor of the next page, `None` once the source is exhausted
    pub fn next_token(&self) -> Option<&PageToken> {
        self.next_token.as_ref()
    }

    /// Start a new search, forgetting any previous cursor
    pub fn search_messages(&mut self, request: &SearchRequest, generation: u64) -> PageRequest {
        self.request = Some(request.clone());
        self.generation = generation;
        self.next_token = None;
        self.in_flight = Some(PageToken::initial());
        self.build(PageToken::initial())
    }

    /// Request the page after the last accepted one.
    ///
    /// Returns `None` while a page is still in flight or when nothing is left.
    pub fn search_more(&mut self) -> Option<PageRequest> {
        if self.request.is_none() || self.in_flight.is_some() {
            return None;
        }
        let token = self.next_token.clone()?;
        self.in_flight = Some(token.clone());
        Some(self.build(token))
    }

    /// Check a response against the running search and advance the cursor.
    pub fn accept(&mut self, response: &PageResponse) -> bool {
        if response.generation != self.generation {
            debug!(
                source = ?self.source,
                stale = response.generation,
                current = self.generation,
                "dropping page from superseded search"
            );
            return false;
        }
        if self.in_flight.as_ref() != Some(&response.token) {
            debug!(source = ?self.source, token = %response.token, "dropping unexpected page");
            return false;
        }
        self.in_flight = None;
        self.next_token = response.found.next_token.clone();
        true
    }

    pub fn clear(&mut self) {
        self.request = None;
        self.next_token = None;
        self.in_flight = None;
    }

    fn build(&self, token: PageToken) -> PageRequest {
        let (query, from) = match &self.request {
            Some(request) => (request.query.clone(), request.from.clone()),
            None => (String::new(), None),
        };
        PageRequest {
            source: self.source,
            conversation: self.conversation,
            generation: self.generation,
            query,
            from,
            token,
            limit: self.page_size,
        }
    }
}
