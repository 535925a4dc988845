use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::SearchOptions;
use crate::backend::SearchBackend;

pub mod application;
pub mod constants;
pub mod domain;
pub mod headless;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use self::application::{conversation_store::ConversationStore, search_service::SearchService};
use self::constants::{EVENT_POLL_INTERVAL_MS, MESSAGE_CLEAR_DELAY_MS, RESULT_LIST_HEIGHT};
use self::domain::models::{ConversationId, MessageRef, PageRequest, PageResponse, SearchRequest};
use self::ui::{
    app_state::{AppState, Mode},
    commands::Command,
    components::Component,
    events::Message,
    renderer::Renderer,
};

pub use self::headless::HeadlessSearch;

/// First message of `conversation` sent on or after `date`
pub fn message_on_or_after(
    store: &dyn ConversationStore,
    conversation: ConversationId,
    date: NaiveDate,
) -> Option<MessageRef> {
    store
        .messages(conversation)
        .iter()
        .find(|message| {
            message
                .date_time()
                .is_some_and(|date_time| date_time.date_naive() >= date)
        })
        .map(|message| MessageRef::new(conversation, message.id))
}

/// Terminal host: owns the orchestrator, runs page requests on a worker
/// thread and plays the host services (navigation, picker, calendar).
pub struct InteractiveSearch {
    state: AppState,
    renderer: Renderer,
    store: Arc<dyn ConversationStore>,
    search_service: Arc<SearchService>,
    search_sender: Option<Sender<PageRequest>>,
    search_receiver: Option<Receiver<PageResponse>>,
    search_deadline: Option<Instant>,
    message_timer: Option<Instant>,
    anchor: Option<MessageRef>,
    should_quit: bool,
}

impl InteractiveSearch {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        backend: Arc<dyn SearchBackend>,
        options: &SearchOptions,
    ) -> Self {
        Self {
            state: AppState::from_store(store.as_ref(), options),
            renderer: Renderer::new(),
            store,
            search_service: Arc::new(SearchService::new(backend)),
            search_sender: None,
            search_receiver: None,
            search_deadline: None,
            message_timer: None,
            anchor: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, initial: Option<SearchRequest>) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        let (tx, rx) = self.start_search_worker();
        self.search_sender = Some(tx);
        self.search_receiver = Some(rx);

        self.handle_message(Message::SetInnerFocus);
        if let Some(request) = initial {
            if request.from.is_some() {
                self.handle_message(Message::SenderChosen(request.from));
            }
            self.handle_message(Message::QueryChanged(request.query));
            self.handle_message(Message::SubmitQuery);
        }

        let result = self.run_app(&mut terminal);

        self.cleanup_terminal(&mut terminal)?;
        info!("interactive search closed");
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.state
                .browser
                .ensure_visible(RESULT_LIST_HEIGHT.saturating_sub(2) as usize);
            terminal.draw(|f| {
                self.renderer
                    .render(f, &self.state, self.store.as_ref(), self.anchor);
            })?;

            // Drain finished pages
            let responses: Vec<PageResponse> = match &self.search_receiver {
                Some(receiver) => receiver.try_iter().collect(),
                None => Vec::new(),
            };
            for response in responses {
                self.handle_message(Message::PageLoaded(response));
            }

            // Debounced search
            if self
                .search_deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
            {
                self.search_deadline = None;
                self.handle_message(Message::SearchTimerElapsed);
            }

            // Status message auto-clear
            if let Some(timer) = self.message_timer {
                if timer.elapsed() >= Duration::from_millis(MESSAGE_CLEAR_DELAY_MS) {
                    self.message_timer = None;
                    self.handle_message(Message::ClearStatus);
                }
            }

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_input(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_message(Message::HideAnimated);
            return;
        }

        let message = match self.state.mode {
            Mode::Search => self.handle_search_mode_input(key),
            Mode::SenderPicker => self.renderer.get_sender_picker_mut().handle_key(key),
            Mode::Calendar => self.renderer.get_date_prompt_mut().handle_key(key),
            Mode::Help => self.renderer.get_help_dialog_mut().handle_key(key),
        };

        if let Some(msg) = message {
            self.handle_message(msg);
        }
    }

    fn handle_search_mode_input(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::F(1) => return Some(Message::ShowHelp),
            KeyCode::Esc if !self.state.browser.is_visible() => {
                return Some(Message::HideAnimated);
            }
            _ => {}
        }

        let routed = if self.state.browser.is_visible() {
            self.renderer.get_result_list_mut().handle_key(key)
        } else {
            self.renderer.get_pager_bar_mut().handle_key(key)
        };
        routed.or_else(|| self.renderer.get_search_bar_mut().handle_key(key))
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        for command in command.into_vec() {
            match command {
                Command::None | Command::Batch(_) => {}
                Command::ScheduleSearch(delay) => {
                    self.search_deadline = Some(Instant::now() + delay);
                }
                Command::FetchPage(request) => self.send_request(request),
                Command::JumpToMessage(target) => {
                    debug!(conversation = target.conversation, id = target.id, "navigate");
                    self.anchor = Some(target);
                }
                Command::JumpToDate(conversation, date) => {
                    match message_on_or_after(self.store.as_ref(), conversation, date) {
                        Some(target) => self.anchor = Some(target),
                        None => {
                            self.handle_message(Message::SetStatus(format!(
                                "No messages since {date}"
                            )));
                            self.message_timer = Some(Instant::now());
                        }
                    }
                }
                Command::ShowCalendar(_) => {
                    self.renderer.get_date_prompt_mut().reset();
                }
                Command::ShowSenderPicker(_) => {
                    let senders = self.store.senders();
                    self.renderer.get_sender_picker_mut().set_senders(senders);
                }
                Command::FocusQuery => {}
                Command::NotifyDestroyed => {
                    self.should_quit = true;
                }
            }
        }
    }

    fn send_request(&mut self, request: PageRequest) {
        let Some(sender) = &self.search_sender else {
            return;
        };
        if let Err(e) = sender.send(request) {
            warn!(error = %e, "search worker is gone");
        }
    }

    fn start_search_worker(&self) -> (Sender<PageRequest>, Receiver<PageResponse>) {
        let (request_tx, request_rx) = mpsc::channel::<PageRequest>();
        let (response_tx, response_rx) = mpsc::channel::<PageResponse>();
        let search_service = self.search_service.clone();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let response = search_service.search_or_empty(&request);
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });

        (request_tx, response_rx)
    }
}
