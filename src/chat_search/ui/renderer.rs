use crate::chat_search::application::conversation_store::ConversationStore;
use crate::chat_search::constants::{
    CONTEXT_MESSAGES, PAGER_BAR_HEIGHT, RESULT_LIST_HEIGHT, SEARCH_BAR_HEIGHT,
};
use crate::chat_search::domain::models::MessageRef;
use crate::chat_search::ui::app_state::{AppState, Mode};
use crate::chat_search::ui::components::{
    Component,
    conversation_view::ConversationView,
    date_prompt::DatePrompt,
    help_dialog::HelpDialog,
    pager_bar::PagerBar,
    result_list::{ResultList, ResultRow},
    search_bar::SearchBar,
    sender_picker::SenderPicker,
};
use crate::schemas::ChatMessage;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

#[derive(Default)]
pub struct Renderer {
    search_bar: SearchBar,
    pager_bar: PagerBar,
    result_list: ResultList,
    conversation_view: ConversationView,
    sender_picker: SenderPicker,
    date_prompt: DatePrompt,
    help_dialog: HelpDialog,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the search over the conversation pane. `anchor` is the message
    /// the host last navigated to.
    pub fn render(
        &mut self,
        f: &mut Frame,
        state: &AppState,
        store: &dyn ConversationStore,
        anchor: Option<MessageRef>,
    ) {
        let list_height = if state.browser.is_visible() {
            RESULT_LIST_HEIGHT
        } else {
            0
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT),
                Constraint::Length(PAGER_BAR_HEIGHT),
                Constraint::Length(list_height),
                Constraint::Min(0),
            ])
            .split(f.area());

        self.search_bar.set_query(state.query.query());
        self.search_bar.set_chip(state.query.chip_label());
        self.search_bar.set_searching(state.ui.is_searching);
        self.search_bar.set_message(state.ui.message.clone());

        self.pager_bar.set_navigator(&state.navigator);
        self.pager_bar.set_list_visible(state.browser.is_visible());
        self.pager_bar
            .set_affordances(state.can_choose_sender(), state.can_choose_date());

        self.search_bar.render(f, chunks[0]);
        self.pager_bar.render(f, chunks[1]);

        if state.browser.is_visible() {
            let rows = state
                .browser
                .rows()
                .iter()
                .map(|id| store.message(*id).map(|message| ResultRow::new(*id, message)))
                .collect();
            self.result_list.set_rows(rows);
            self.result_list
                .set_selection(state.browser.selected(), state.browser.scroll_offset());
            self.result_list.set_total(state.navigator.total());
            self.result_list.render(f, chunks[2]);
        }

        self.sync_conversation_view(state, store, anchor);
        self.conversation_view.render(f, chunks[3]);

        match state.mode {
            Mode::Search => {}
            Mode::SenderPicker => self.sender_picker.render(f, f.area()),
            Mode::Calendar => self.date_prompt.render(f, f.area()),
            Mode::Help => self.help_dialog.render(f, f.area()),
        }
    }

    fn sync_conversation_view(
        &mut self,
        state: &AppState,
        store: &dyn ConversationStore,
        anchor: Option<MessageRef>,
    ) {
        let primary = store.primary();
        let conversation = anchor.map_or(primary.id, |anchor| anchor.conversation);
        let title = if conversation == primary.id {
            primary.title.clone()
        } else {
            format!("{} (earlier history)", primary.title)
        };

        let focused = anchor.map(|anchor| anchor.id);
        let window = context_window(store.messages(conversation), focused, CONTEXT_MESSAGES);

        self.conversation_view.set_title(title);
        self.conversation_view.set_messages(window.to_vec(), focused);
        self.conversation_view.set_query(state.query.query());
    }

    pub fn get_search_bar_mut(&mut self) -> &mut SearchBar {
        &mut self.search_bar
    }

    pub fn get_pager_bar_mut(&mut self) -> &mut PagerBar {
        &mut self.pager_bar
    }

    pub fn get_result_list_mut(&mut self) -> &mut ResultList {
        &mut self.result_list
    }

    pub fn get_sender_picker_mut(&mut self) -> &mut SenderPicker {
        &mut self.sender_picker
    }

    pub fn get_date_prompt_mut(&mut self) -> &mut DatePrompt {
        &mut self.date_prompt
    }

    pub fn get_help_dialog_mut(&mut self) -> &mut HelpDialog {
        &mut self.help_dialog
    }
}

/// `radius` messages on each side of `focused`, or the latest ones when
/// nothing is focused
pub fn context_window(
    messages: &[ChatMessage],
    focused: Option<i64>,
    radius: usize,
) -> &[ChatMessage] {
    let center = focused.and_then(|id| messages.iter().position(|message| message.id == id));
    match center {
        Some(center) => {
            let start = center.saturating_sub(radius);
            let end = (center + radius + 1).min(messages.len());
            &messages[start..end]
        }
        None => {
            let start = messages.len().saturating_sub(radius * 2);
            &messages[start..]
        }
    }
}
