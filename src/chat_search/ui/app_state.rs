use crate::SearchOptions;
use crate::chat_search::application::conversation_store::ConversationStore;
use crate::chat_search::application::navigator::{Navigator, Step};
use crate::chat_search::application::query_input::{QueryInput, QueryOutcome};
use crate::chat_search::application::result_browser::ResultBrowser;
use crate::chat_search::application::result_merger::{MergeEvent, ResultMerger};
use crate::chat_search::constants::LOAD_MORE_THRESHOLD;
use crate::chat_search::domain::models::{
    ConversationId, Lifecycle, MessageRef, PageResponse, PendingJump, SearchRequest,
};
use crate::chat_search::ui::commands::Command;
use crate::chat_search::ui::events::Message;
use std::time::Duration;
use tracing::{debug, info};

// Re-export Mode
pub use crate::chat_search::domain::models::Mode;

pub struct AppState {
    pub mode: Mode,
    pub lifecycle: Lifecycle,
    pub conversation: ConversationId,
    pub supports_sender_filter: bool,
    pub query: QueryInput,
    pub merger: ResultMerger,
    pub navigator: Navigator,
    pub browser: ResultBrowser,
    pub pending_jump: Option<PendingJump>,
    pub ui: UiState,
}

#[derive(Debug, Default)]
pub struct UiState {
    pub message: Option<String>,
    pub focused_message: Option<MessageRef>,
    pub is_searching: bool,
    pub query_focused: bool,
}

impl AppState {
    pub fn new(
        conversation: ConversationId,
        migrated_from: Option<ConversationId>,
        supports_sender_filter: bool,
        options: &SearchOptions,
    ) -> Self {
        Self {
            mode: Mode::Search,
            lifecycle: Lifecycle::Shown,
            conversation,
            supports_sender_filter,
            query: QueryInput::new(
                Duration::from_millis(options.debounce_ms),
                options.typed_cache_limit,
            ),
            merger: ResultMerger::new(conversation, migrated_from, options.page_size),
            navigator: Navigator::new(),
            browser: ResultBrowser::new(LOAD_MORE_THRESHOLD),
            pending_jump: None,
            ui: UiState::default(),
        }
    }

    pub fn from_store(store: &dyn ConversationStore, options: &SearchOptions) -> Self {
        Self::new(
            store.primary().id,
            store.migrated_from(),
            store.supports_sender_filter(),
            options,
        )
    }

    /// The sender picker is offered only while no sender is chosen
    pub fn can_choose_sender(&self) -> bool {
        self.supports_sender_filter && self.query.from().is_none()
    }

    pub fn can_choose_date(&self) -> bool {
        self.query.from().is_none()
    }

    pub fn update(&mut self, msg: Message) -> Command {
        if self.lifecycle == Lifecycle::Destroyed {
            return Command::None;
        }

        match msg {
            Message::QueryChanged(query) => {
                self.browser.hide();
                let outcome = self.query.set_query(query);
                self.on_query_outcome(outcome)
            }
            Message::SubmitQuery => {
                let request = self.query.submit();
                self.start_search(request)
            }
            Message::SearchTimerElapsed => match self.query.timer_elapsed() {
                Some(request) => self.start_search(request),
                None => Command::None,
            },
            Message::SenderChosen(from) => {
                self.mode = Mode::Search;
                self.browser.hide();
                let outcome = self.query.set_from(from);
                Command::batch(vec![self.on_query_outcome(outcome), Command::FocusQuery])
            }
            Message::PageLoaded(response) => self.on_page_loaded(response),
            Message::StepForward => match self.navigator.step(Step::Forward) {
                Some(index) => self.resolve_intent(index),
                None => Command::None,
            },
            Message::StepBack => match self.navigator.step(Step::Back) {
                Some(index) => self.resolve_intent(index),
                None => Command::None,
            },
            Message::JumpToIndex(index) => {
                if self.navigator.total().is_none() {
                    return Command::None;
                }
                match self.navigator.set_current(index.saturating_add(1)) {
                    Some(index) => self.resolve_intent(index),
                    None => Command::None,
                }
            }
            Message::ToggleList => {
                if !self.navigator.can_show_list() {
                    return Command::None;
                }
                if self.browser.is_visible() {
                    self.browser.hide();
                } else {
                    self.browser.show();
                    self.browser
                        .select_index(self.navigator.current().saturating_sub(1));
                }
                Command::None
            }
            Message::ShowCalendar => {
                if !self.can_choose_date() {
                    return Command::None;
                }
                self.browser.hide();
                self.mode = Mode::Calendar;
                Command::ShowCalendar(self.conversation)
            }
            Message::ShowSenderPicker => {
                if !self.can_choose_sender() {
                    return Command::None;
                }
                self.mode = Mode::SenderPicker;
                Command::ShowSenderPicker(self.conversation)
            }
            Message::DateChosen(date) => {
                self.mode = Mode::Search;
                debug!(%date, "date chosen");
                Command::JumpToDate(self.conversation, date)
            }
            Message::CloseDialog => {
                self.mode = Mode::Search;
                Command::FocusQuery
            }
            Message::BrowserMove(delta) => {
                if self.browser.move_selection(delta) {
                    self.browser_need_more()
                } else {
                    Command::None
                }
            }
            Message::BrowserHome => {
                self.browser.select_first();
                Command::None
            }
            Message::BrowserEnd => {
                if self.browser.select_last() {
                    self.browser_need_more()
                } else {
                    Command::None
                }
            }
            Message::BrowserActivate => match self.browser.selected_row() {
                Some(row) => self.row_activated(row),
                None => Command::None,
            },
            Message::BrowserRowActivated(row) => self.row_activated(row),
            Message::BrowserNeedMore => self.request_more(),
            Message::ShowHelp => {
                self.mode = Mode::Help;
                Command::None
            }
            Message::CloseHelp => {
                self.mode = Mode::Search;
                Command::None
            }
            Message::SetInnerFocus => {
                self.ui.query_focused = true;
                Command::FocusQuery
            }
            Message::HideAnimated => {
                self.browser.hide();
                self.pending_jump = None;
                self.lifecycle = Lifecycle::Destroyed;
                info!(conversation = self.conversation, "search destroyed");
                Command::NotifyDestroyed
            }
            Message::SetStatus(message) => {
                self.ui.message = Some(message);
                Command::None
            }
            Message::ClearStatus => {
                self.ui.message = None;
                Command::None
            }
        }
    }

    fn on_query_outcome(&mut self, outcome: QueryOutcome) -> Command {
        match outcome {
            QueryOutcome::Emit(request) => self.start_search(request),
            QueryOutcome::Schedule(delay) => {
                self.ui.message = Some("[typing...]".to_string());
                Command::ScheduleSearch(delay)
            }
        }
    }

    fn start_search(&mut self, request: SearchRequest) -> Command {
        if request.is_empty() {
            self.ui.message = None;
            return Command::None;
        }

        self.pending_jump = None;
        self.ui.is_searching = true;
        self.ui.message = Some("[searching...]".to_string());
        info!(query = %request.query, from = ?request.from, "search requested");

        let requests = self.merger.search(&request);
        Command::batch(requests.into_iter().map(Command::FetchPage).collect())
    }

    fn on_page_loaded(&mut self, response: PageResponse) -> Command {
        match self.merger.on_page(response) {
            MergeEvent::NewResults => {
                self.ui.is_searching = false;
                self.ui.message = None;
                self.browser.add_items(self.merger.messages(), true);

                let total = self.merger.total().unwrap_or(0);
                match self.navigator.set_total(total) {
                    Some(index) => self.resolve_intent(index),
                    None => {
                        self.ui.focused_message = None;
                        Command::None
                    }
                }
            }
            MergeEvent::NextResults { completed } => {
                self.browser.add_items(self.merger.messages(), false);
                match self.pending_jump.take() {
                    Some(pending) if pending.token == completed => {
                        debug!(index = pending.index, token = %completed, "pending jump resumed");
                        self.resolve_intent(pending.index)
                    }
                    other => {
                        self.pending_jump = other;
                        Command::None
                    }
                }
            }
            MergeEvent::Waiting | MergeEvent::Dropped => Command::None,
        }
    }

    /// Navigate to the zero-based `index` of the combined results, fetching
    /// the next page first when it is not loaded yet.
    fn resolve_intent(&mut self, index: usize) -> Command {
        let size = self.merger.loaded_count();
        let mut commands = Vec::new();

        let more_available = self.merger.total().is_some_and(|total| size < total);
        if index + 1 >= size && more_available {
            if let Some(request) = self.merger.search_more() {
                commands.push(Command::FetchPage(request));
            }
        }

        let Some(target) = self.merger.messages().get(index).copied() else {
            self.pending_jump = self.merger.next_token().map(|token| PendingJump {
                token: token.clone(),
                index,
            });
            debug!(index, loaded = size, pending = ?self.pending_jump, "jump deferred");
            return Command::batch(commands);
        };

        self.pending_jump = None;
        self.ui.focused_message = Some(target);
        self.browser.hide();
        self.browser.select_index(index);
        debug!(index, message = target.id, "jump resolved");
        commands.push(Command::JumpToMessage(target));
        Command::batch(commands)
    }

    fn row_activated(&mut self, row: MessageRef) -> Command {
        let Some(position) = self.merger.messages().iter().position(|id| *id == row) else {
            return Command::None;
        };
        match self.navigator.set_current(position + 1) {
            Some(index) => self.resolve_intent(index),
            None => Command::None,
        }
    }

    fn browser_need_more(&mut self) -> Command {
        if self.browser.needs_more() {
            self.request_more()
        } else {
            Command::None
        }
    }

    // Only while something is left to load
    fn request_more(&mut self) -> Command {
        if self.merger.total() == Some(self.merger.loaded_count()) {
            return Command::None;
        }
        match self.merger.search_more() {
            Some(request) => Command::FetchPage(request),
            None => Command::None,
        }
    }
}
