use crate::SearchOptions;
use crate::backend::SearchBackend;
use crate::chat_search::application::conversation_store::ConversationStore;
use crate::chat_search::application::search_service::SearchService;
use crate::chat_search::domain::models::{MessageRef, SearchRequest};
use crate::chat_search::message_on_or_after;
use crate::chat_search::ui::app_state::AppState;
use crate::chat_search::ui::commands::Command;
use crate::chat_search::ui::events::Message;
use crate::schemas::ChatMessage;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Drives the orchestrator without a terminal. Every command is executed
/// synchronously: fetches run on the calling thread and their pages are fed
/// straight back, host requests are recorded.
pub struct HeadlessSearch {
    state: AppState,
    service: SearchService,
    store: Arc<dyn ConversationStore>,
    jumps: Vec<MessageRef>,
    host_requests: Vec<Command>,
    scheduled_search: Option<Duration>,
    destroyed: bool,
}

impl HeadlessSearch {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        backend: Arc<dyn SearchBackend>,
        options: &SearchOptions,
    ) -> Self {
        Self {
            state: AppState::from_store(store.as_ref(), options),
            service: SearchService::new(backend),
            store,
            jumps: Vec::new(),
            host_requests: Vec::new(),
            scheduled_search: None,
            destroyed: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Every message the orchestrator navigated to, oldest first
    pub fn jumps(&self) -> &[MessageRef] {
        &self.jumps
    }

    pub fn last_jump(&self) -> Option<MessageRef> {
        self.jumps.last().copied()
    }

    /// Calendar, picker and focus requests, in the order they were made
    pub fn host_requests(&self) -> &[Command] {
        &self.host_requests
    }

    pub fn scheduled_search(&self) -> Option<Duration> {
        self.scheduled_search
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Loaded results in merged order, resolved through the store
    pub fn results(&self) -> Vec<(MessageRef, Option<&ChatMessage>)> {
        self.state
            .merger
            .messages()
            .iter()
            .map(|id| (*id, self.store.message(*id)))
            .collect()
    }

    pub fn message(&self, id: MessageRef) -> Option<&ChatMessage> {
        self.store.message(id)
    }

    /// Feed one message through the orchestrator and run everything it asks for
    pub fn dispatch(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute(command);
    }

    /// Type the query (and sender) and submit it right away
    pub fn search(&mut self, request: SearchRequest) {
        if request.from.is_some() {
            self.dispatch(Message::SenderChosen(request.from));
        }
        self.dispatch(Message::QueryChanged(request.query));
        self.dispatch(Message::SubmitQuery);
        self.scheduled_search = None;
    }

    /// Let the debounce delay pass
    pub fn fire_timer(&mut self) {
        if self.scheduled_search.take().is_some() {
            self.dispatch(Message::SearchTimerElapsed);
        }
    }

    /// Keep requesting pages until everything (or `limit` results) is loaded
    pub fn load_more_until(&mut self, limit: Option<usize>) {
        loop {
            let loaded = self.state.merger.loaded_count();
            let total = self.state.merger.total().unwrap_or(0);
            if loaded >= total || limit.is_some_and(|limit| loaded >= limit) {
                break;
            }
            self.dispatch(Message::BrowserNeedMore);
            if self.state.merger.loaded_count() == loaded {
                debug!(loaded, total, "no further progress");
                break;
            }
        }
    }

    fn execute(&mut self, command: Command) {
        let mut queue: VecDeque<Command> = command.into_vec().into();
        while let Some(command) = queue.pop_front() {
            match command {
                Command::None | Command::Batch(_) => {}
                Command::ScheduleSearch(delay) => {
                    self.scheduled_search = Some(delay);
                }
                Command::FetchPage(request) => {
                    let response = self.service.search_or_empty(&request);
                    let next = self.state.update(Message::PageLoaded(response));
                    queue.extend(next.into_vec());
                }
                Command::JumpToMessage(target) => {
                    self.jumps.push(target);
                }
                Command::JumpToDate(conversation, date) => {
                    let target = message_on_or_after(self.store.as_ref(), conversation, date);
                    debug!(%date, target = ?target, "date jump");
                    if let Some(target) = target {
                        self.jumps.push(target);
                    }
                    self.host_requests.push(Command::JumpToDate(conversation, date));
                }
                Command::NotifyDestroyed => {
                    self.destroyed = true;
                }
                request @ (Command::ShowCalendar(_)
                | Command::ShowSenderPicker(_)
                | Command::FocusQuery) => {
                    self.host_requests.push(request);
                }
            }
        }
    }
}
