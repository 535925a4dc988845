use crate::chat_search::constants::FILE_READ_BUFFER_SIZE;
use crate::chat_search::domain::models::{ConversationId, MessageRef, SenderId};
use crate::schemas::{ChatMessage, ConversationHeader, ConversationKind, ExportLine};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

const DEFAULT_PRIMARY_ID: ConversationId = 1;
const DEFAULT_MIGRATED_ID: ConversationId = 0;

/// Resolves message ids to displayable messages and describes the conversation
pub trait ConversationStore: Send + Sync {
    fn primary(&self) -> &ConversationHeader;

    fn message(&self, id: MessageRef) -> Option<&ChatMessage>;

    /// Messages of one conversation, oldest first
    fn messages(&self, conversation: ConversationId) -> &[ChatMessage];

    fn migrated_from(&self) -> Option<ConversationId> {
        self.primary().migrated_from
    }

    /// Sender-scoped search only makes sense with more than two participants
    fn supports_sender_filter(&self) -> bool {
        self.primary().kind == ConversationKind::Group
    }

    fn senders(&self) -> Vec<SenderId>;
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub header: ConversationHeader,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(header: ConversationHeader, mut messages: Vec<ChatMessage>) -> Self {
        messages.sort_by_key(|message| message.id);
        Self { header, messages }
    }

    /// Load a conversation from a JSON Lines export
    pub fn load(path: &Path, default_id: ConversationId) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open export {}", path.display()))?;
        let reader = std::io::BufReader::with_capacity(FILE_READ_BUFFER_SIZE, file);

        let mut header = None;
        let mut messages = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            match sonic_rs::from_slice::<ExportLine>(line.as_bytes()) {
                Ok(ExportLine::Conversation(parsed)) => header = Some(parsed),
                Ok(ExportLine::Message(message)) => messages.push(message),
                Err(e) => debug!(line = number + 1, error = %e, "skipping export line"),
            }
        }

        let header = header.unwrap_or_else(|| ConversationHeader {
            id: default_id,
            title: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            kind: ConversationKind::Private,
            migrated_from: None,
        });
        Ok(Self::new(header, messages))
    }

    fn find(&self, id: i64) -> Option<&ChatMessage> {
        self.messages
            .binary_search_by_key(&id, |message| message.id)
            .ok()
            .and_then(|index| self.messages.get(index))
    }
}

/// In-memory store built from one export plus an optional predecessor export
pub struct ExportStore {
    primary: Conversation,
    migrated: Option<Conversation>,
}

impl ExportStore {
    pub fn new(mut primary: Conversation, migrated: Option<Conversation>) -> Self {
        if let Some(migrated) = &migrated {
            primary.header.migrated_from = Some(migrated.header.id);
        }
        Self { primary, migrated }
    }

    pub fn load(primary: &Path, migrated: Option<&Path>) -> Result<Self> {
        let primary = Conversation::load(primary, DEFAULT_PRIMARY_ID)?;
        let migrated = migrated
            .map(|path| Conversation::load(path, DEFAULT_MIGRATED_ID))
            .transpose()?;
        Ok(Self::new(primary, migrated))
    }

    fn conversation(&self, id: ConversationId) -> Option<&Conversation> {
        if self.primary.header.id == id {
            return Some(&self.primary);
        }
        self.migrated
            .as_ref()
            .filter(|migrated| migrated.header.id == id)
    }
}

impl ConversationStore for ExportStore {
    fn primary(&self) -> &ConversationHeader {
        &self.primary.header
    }

    fn message(&self, id: MessageRef) -> Option<&ChatMessage> {
        self.conversation(id.conversation)?.find(id.id)
    }

    fn messages(&self, conversation: ConversationId) -> &[ChatMessage] {
        self.conversation(conversation)
            .map(|conversation| conversation.messages.as_slice())
            .unwrap_or_default()
    }

    fn senders(&self) -> Vec<SenderId> {
        let senders: BTreeSet<&str> = self
            .primary
            .messages
            .iter()
            .map(|message| message.from.as_str())
            .collect();
        senders.into_iter().map(SenderId::new).collect()
    }
}
