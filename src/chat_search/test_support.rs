//! Fixtures shared by the chat search tests

use crate::chat_search::application::conversation_store::{Conversation, ExportStore};
use crate::schemas::{ChatMessage, ConversationHeader, ConversationKind};
use std::io::Write;
use std::path::PathBuf;

pub fn create_message(id: i64, from: &str, text: &str) -> ChatMessage {
    ChatMessage {
        id,
        from: from.to_string(),
        date: format!("2024-01-{:02}T12:00:00Z", (id % 28) + 1),
        text: text.to_string(),
    }
}

pub fn create_conversation(
    id: i64,
    kind: ConversationKind,
    messages: Vec<ChatMessage>,
) -> Conversation {
    Conversation::new(
        ConversationHeader {
            id,
            title: format!("conversation {id}"),
            kind,
            migrated_from: None,
        },
        messages,
    )
}

/// `count` messages, every one of them mentioning `word`, alternating senders
pub fn create_matching_messages(count: i64, word: &str) -> Vec<ChatMessage> {
    (1..=count)
        .map(|id| {
            let from = if id % 2 == 0 { "alice" } else { "bob" };
            create_message(id, from, &format!("{word} number {id}"))
        })
        .collect()
}

pub fn create_store(primary: Vec<ChatMessage>, migrated: Option<Vec<ChatMessage>>) -> ExportStore {
    ExportStore::new(
        create_conversation(1, ConversationKind::Group, primary),
        migrated.map(|messages| create_conversation(2, ConversationKind::Group, messages)),
    )
}

pub fn write_export(dir: &tempfile::TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

pub fn message_line(id: i64, from: &str, text: &str) -> String {
    serde_json::json!({
        "type": "message",
        "id": id,
        "from": from,
        "date": format!("2024-02-{:02}T08:30:00Z", (id % 28) + 1),
        "text": text,
    })
    .to_string()
}
