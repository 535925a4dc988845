use serde::{Deserialize, Serialize};
use std::fmt;

pub type ConversationId = i64;

/// Identity of a message author, used as the optional sender filter
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SenderId(pub String);

impl SenderId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified message id: the conversation it lives in plus its id there
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub conversation: ConversationId,
    pub id: i64,
}

impl MessageRef {
    pub fn new(conversation: ConversationId, id: i64) -> Self {
        Self { conversation, id }
    }
}

/// Opaque continuation cursor. The empty token asks for the first page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageToken(String);

impl PageToken {
    pub fn initial() -> Self {
        Self(String::new())
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_initial(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_initial() {
            f.write_str("<initial>")
        } else {
            f.write_str(&self.0)
        }
    }
}

// Query text plus optional sender; compared by value for the typed-request cache
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub query: String,
    pub from: Option<SenderId>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, from: Option<SenderId>) -> Self {
        Self {
            query: query.into(),
            from,
        }
    }

    /// Empty query without a sender never reaches the backend
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.from.is_none()
    }
}

/// One page of search results
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundMessages {
    pub messages: Vec<MessageRef>,
    pub total: usize,
    pub next_token: Option<PageToken>,
}

impl FoundMessages {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchSource {
    Primary,
    Migrated,
}

// Request and response exchanged with the search worker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub source: SearchSource,
    pub conversation: ConversationId,
    pub generation: u64,
    pub query: String,
    pub from: Option<SenderId>,
    pub token: PageToken,
    pub limit: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageResponse {
    pub source: SearchSource,
    pub generation: u64,
    /// The cursor the request was issued with
    pub token: PageToken,
    pub found: FoundMessages,
}

impl PageResponse {
    pub fn for_request(request: &PageRequest, found: FoundMessages) -> Self {
        Self {
            source: request.source,
            generation: request.generation,
            token: request.token.clone(),
            found,
        }
    }
}

/// A navigation target waiting for a page that is not loaded yet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingJump {
    pub token: PageToken,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Search,
    SenderPicker,
    Calendar,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Shown,
    Destroyed,
}
