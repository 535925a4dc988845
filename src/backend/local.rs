use super::SearchBackend;
use crate::chat_search::application::conversation_store::ConversationStore;
use crate::chat_search::domain::models::{FoundMessages, MessageRef, PageRequest, PageToken};
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Answers page requests from a loaded export, newest message first.
///
/// Matching is a case-insensitive literal search on the message text. The
/// continuation token is the id of the last message returned; the next page
/// continues strictly below it.
pub struct LocalExportBackend {
    store: Arc<dyn ConversationStore>,
    latency: Duration,
}

impl LocalExportBackend {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
        }
    }

    /// Delay every answer, to behave like a remote service
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn matcher(query: &str) -> Result<Option<Regex>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let regex = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()?;
        Ok(Some(regex))
    }

    fn offset(token: &PageToken) -> Result<Option<i64>> {
        if token.is_initial() {
            return Ok(None);
        }
        let offset = token
            .as_str()
            .parse::<i64>()
            .with_context(|| format!("Invalid continuation token: {token}"))?;
        Ok(Some(offset))
    }
}

impl SearchBackend for LocalExportBackend {
    fn search(&self, request: &PageRequest) -> Result<FoundMessages> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let matcher = Self::matcher(&request.query)?;
        let offset = Self::offset(&request.token)?;

        let matches: Vec<i64> = self
            .store
            .messages(request.conversation)
            .iter()
            .rev()
            .filter(|message| {
                request
                    .from
                    .as_ref()
                    .is_none_or(|from| from.as_str() == message.from)
            })
            .filter(|message| {
                matcher
                    .as_ref()
                    .is_none_or(|regex| regex.is_match(&message.text))
            })
            .map(|message| message.id)
            .collect();

        let total = matches.len();
        let remaining: Vec<i64> = match offset {
            Some(offset) => matches.into_iter().filter(|&id| id < offset).collect(),
            None => matches,
        };

        let limit = request.limit.max(1);
        let page: Vec<i64> = remaining.iter().take(limit).copied().collect();
        let next_token = if remaining.len() > page.len() {
            page.last().map(|id| PageToken::new(id.to_string()))
        } else {
            None
        };

        Ok(FoundMessages {
            messages: page
                .into_iter()
                .map(|id| MessageRef::new(request.conversation, id))
                .collect(),
            total,
            next_token,
        })
    }
}
