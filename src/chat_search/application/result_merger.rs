use crate::chat_search::application::messages_search::MessagesSearch;
use crate::chat_search::domain::models::{
    ConversationId, FoundMessages, MessageRef, PageRequest, PageResponse, PageToken,
    SearchRequest, SearchSource,
};
use tracing::debug;

/// What a merged page means for the consumers of the combined results
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeEvent {
    /// A new search has a complete total; consumers replace what they show
    NewResults,
    /// A continuation page was appended; `completed` is the cursor it answered
    NextResults { completed: PageToken },
    /// Accepted, but the combined total is still waiting for the other source
    Waiting,
    /// Stale or duplicate page, nothing changed
    Dropped,
}

/// Presents the conversation and its migrated predecessor as one growing,
/// ordered result set. Primary results come first; pages from the migrated
/// source are held back until the primary source is exhausted.
pub struct ResultMerger {
    primary: MessagesSearch,
    migrated: Option<MessagesSearch>,
    generation: u64,

    concated: Vec<MessageRef>,
    concated_token: Option<PageToken>,
    primary_loaded: usize,
    primary_total: Option<usize>,

    migrated_first: FoundMessages,
    migrated_token: Option<PageToken>,
    migrated_total: Option<usize>,

    waiting_for_total: bool,
    is_full: bool,
}

impl ResultMerger {
    pub fn new(
        conversation: ConversationId,
        migrated_from: Option<ConversationId>,
        page_size: usize,
    ) -> Self {
        Self {
            primary: MessagesSearch::new(SearchSource::Primary, conversation, page_size),
            migrated: migrated_from
                .map(|id| MessagesSearch::new(SearchSource::Migrated, id, page_size)),
            generation: 0,
            concated: Vec::new(),
            concated_token: None,
            primary_loaded: 0,
            primary_total: None,
            migrated_first: FoundMessages::empty(),
            migrated_token: None,
            migrated_total: None,
            waiting_for_total: false,
            is_full: false,
        }
    }

    pub fn has_migrated(&self) -> bool {
        self.migrated.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn messages(&self) -> &[MessageRef] {
        &self.concated
    }

    pub fn loaded_count(&self) -> usize {
        self.concated.len()
    }

    /// Combined total, known only once every configured source reported one
    pub fn total(&self) -> Option<usize> {
        if self.waiting_for_total {
            return None;
        }
        let primary = self.primary_total?;
        let migrated = if self.migrated.is_some() {
            self.migrated_total.unwrap_or(0)
        } else {
            0
        };
        Some(primary + migrated)
    }

    pub fn is_full(&self) -> bool {
        self.is_full
    }

    pub fn is_waiting_for_total(&self) -> bool {
        self.waiting_for_total
    }

    /// Cursor of the page the active source will deliver next
    pub fn next_token(&self) -> Option<&PageToken> {
        if self.is_full && self.migrated.is_some() {
            self.migrated_token.as_ref()
        } else {
            self.concated_token.as_ref()
        }
    }

    pub fn clear(&mut self) {
        self.concated.clear();
        self.concated_token = None;
        self.primary_loaded = 0;
        self.primary_total = None;
        self.migrated_first = FoundMessages::empty();
        self.migrated_token = None;
        self.migrated_total = None;
        self.waiting_for_total = false;
        self.is_full = false;
        self.primary.clear();
        if let Some(migrated) = self.migrated.as_mut() {
            migrated.clear();
        }
    }

    /// Start a new search on every source. Previous results are discarded.
    pub fn search(&mut self, request: &SearchRequest) -> Vec<PageRequest> {
        self.clear();
        self.generation += 1;

        let mut requests = vec![self.primary.search_messages(request, self.generation)];
        if let Some(migrated) = self.migrated.as_mut() {
            self.waiting_for_total = true;
            requests.push(migrated.search_messages(request, self.generation));
        }
        debug!(
            generation = self.generation,
            query = %request.query,
            sources = requests.len(),
            "search started"
        );
        requests
    }

    /// Ask the active source for its next page
    pub fn search_more(&mut self) -> Option<PageRequest> {
        match self.migrated.as_mut() {
            Some(migrated) if self.is_full => migrated.search_more(),
            _ => self.primary.search_more(),
        }
    }

    pub fn on_page(&mut self, response: PageResponse) -> MergeEvent {
        match response.source {
            SearchSource::Primary => self.on_primary_page(response),
            SearchSource::Migrated => self.on_migrated_page(response),
        }
    }

    fn on_primary_page(&mut self, response: PageResponse) -> MergeEvent {
        if !self.primary.accept(&response) {
            return MergeEvent::Dropped;
        }
        let PageResponse { token, found, .. } = response;
        let exhausted = found.next_token.is_none();

        if self.concated_token.as_ref() == Some(&token) {
            self.primary_loaded += found.messages.len();
            self.concated.extend(found.messages);
            self.concated_token = found.next_token;
            self.primary_total = Some(found.total);
            self.check_full(found.total, exhausted);
            debug!(
                loaded = self.concated.len(),
                token = %token,
                "primary page appended"
            );
            return MergeEvent::NextResults { completed: token };
        }

        self.primary_loaded = found.messages.len();
        self.concated = found.messages;
        self.concated_token = found.next_token;
        self.primary_total = Some(found.total);
        self.check_full(found.total, exhausted);
        self.check_waiting_for_total()
    }

    fn on_migrated_page(&mut self, response: PageResponse) -> MergeEvent {
        let accepted = match self.migrated.as_mut() {
            Some(migrated) => migrated.accept(&response),
            None => false,
        };
        if !accepted {
            return MergeEvent::Dropped;
        }
        let PageResponse { token, found, .. } = response;

        if self.migrated_token.as_ref() == Some(&token) {
            self.migrated_token = found.next_token;
            if self.is_full {
                self.concated.extend(found.messages);
            } else {
                self.migrated_first.messages.extend(found.messages);
            }
            debug!(loaded = self.concated.len(), token = %token, "migrated page appended");
            return MergeEvent::NextResults { completed: token };
        }

        if self.is_full {
            self.concated.extend(found.messages.iter().copied());
        }
        self.migrated_token = found.next_token.clone();
        self.migrated_total = Some(found.total);
        self.migrated_first = found;
        self.check_waiting_for_total()
    }

    // Marks the primary source exhausted and folds the held migrated page in,
    // within the same transition that appended the last primary page.
    fn check_full(&mut self, reported_total: usize, exhausted: bool) {
        if self.is_full {
            return;
        }
        if reported_total == self.primary_loaded || exhausted {
            self.is_full = true;
            let held = std::mem::take(&mut self.migrated_first.messages);
            debug!(
                primary = self.primary_loaded,
                folded = held.len(),
                "primary source exhausted"
            );
            self.concated.extend(held);
        }
    }

    fn check_waiting_for_total(&mut self) -> MergeEvent {
        if !self.waiting_for_total {
            return MergeEvent::NewResults;
        }
        if self.primary_total.is_some() && self.migrated_total.is_some() {
            self.waiting_for_total = false;
            debug!(total = ?self.total(), "combined total ready");
            MergeEvent::NewResults
        } else {
            MergeEvent::Waiting
        }
    }
}
