use serde::{Deserialize, Serialize};

/// Conversation kind as written in the export header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKind {
    #[default]
    Private,
    Group,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationHeader {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: ConversationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrated_from: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub from: String,
    /// RFC3339 timestamp
    pub date: String,
    #[serde(default)]
    pub text: String,
}

impl ChatMessage {
    pub fn date_time(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc3339(&self.date).ok()
    }
}

// One line of a conversation export (JSON Lines)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExportLine {
    Conversation(ConversationHeader),
    Message(ChatMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_line() {
        let line = r#"{"type":"conversation","id":1,"title":"Team","kind":"group","migrated_from":2}"#;
        let parsed: ExportLine = sonic_rs::from_str(line).unwrap();

        match parsed {
            ExportLine::Conversation(header) => {
                assert_eq!(header.id, 1);
                assert_eq!(header.title, "Team");
                assert_eq!(header.kind, ConversationKind::Group);
                assert_eq!(header.migrated_from, Some(2));
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_message_line_defaults() {
        let line = r#"{"type":"message","id":17,"from":"alice","date":"2024-01-01T10:00:00Z"}"#;
        let parsed: ExportLine = sonic_rs::from_str(line).unwrap();

        let ExportLine::Message(message) = parsed else {
            panic!("expected message");
        };
        assert_eq!(message.id, 17);
        assert_eq!(message.from, "alice");
        assert_eq!(message.text, "");
        assert!(message.date_time().is_some());
    }

    #[test]
    fn test_header_kind_defaults_to_private() {
        let line = r#"{"type":"conversation","id":5}"#;
        let parsed: ExportLine = sonic_rs::from_str(line).unwrap();

        let ExportLine::Conversation(header) = parsed else {
            panic!("expected header");
        };
        assert_eq!(header.kind, ConversationKind::Private);
        assert_eq!(header.migrated_from, None);
    }
}
