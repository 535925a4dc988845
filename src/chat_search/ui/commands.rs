use crate::chat_search::domain::models::{ConversationId, MessageRef, PageRequest};
use chrono::NaiveDate;
use std::time::Duration;

/// Side effects requested by the orchestrator; executed by the host
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    Batch(Vec<Command>),
    ScheduleSearch(Duration),
    FetchPage(PageRequest),
    JumpToMessage(MessageRef),
    ShowCalendar(ConversationId),
    JumpToDate(ConversationId, NaiveDate),
    ShowSenderPicker(ConversationId),
    FocusQuery,
    NotifyDestroyed,
}

impl Command {
    /// Collapse a list of commands, dropping `None`s
    pub fn batch(commands: Vec<Command>) -> Command {
        let mut commands: Vec<Command> = commands
            .into_iter()
            .filter(|command| *command != Command::None)
            .collect();
        match commands.len() {
            0 => Command::None,
            1 => commands.remove(0),
            _ => Command::Batch(commands),
        }
    }

    /// Flatten into a list of concrete commands, in execution order
    pub fn into_vec(self) -> Vec<Command> {
        match self {
            Command::None => Vec::new(),
            Command::Batch(commands) => commands.into_iter().flat_map(Command::into_vec).collect(),
            command => vec![command],
        }
    }
}
