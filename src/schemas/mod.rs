pub mod export_line;

pub use export_line::{ChatMessage, ConversationHeader, ConversationKind, ExportLine};
