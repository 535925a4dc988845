use crate::chat_search::application::navigator::Navigator;
use crate::chat_search::ui::components::{Component, view_layout::Styles};
use crate::chat_search::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Counter, step buttons and the host affordances below the query.
/// Disabled buttons are drawn dimmed and ignore their keys.
#[derive(Default)]
pub struct PagerBar {
    counter: String,
    can_step_forward: bool,
    can_step_back: bool,
    can_show_list: bool,
    list_visible: bool,
    can_choose_sender: bool,
    can_choose_date: bool,
}

impl PagerBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_navigator(&mut self, navigator: &Navigator) {
        self.counter = navigator.counter_text();
        self.can_step_forward = navigator.can_step_forward();
        self.can_step_back = navigator.can_step_back();
        self.can_show_list = navigator.can_show_list();
    }

    pub fn set_list_visible(&mut self, visible: bool) {
        self.list_visible = visible;
    }

    pub fn set_affordances(&mut self, can_choose_sender: bool, can_choose_date: bool) {
        self.can_choose_sender = can_choose_sender;
        self.can_choose_date = can_choose_date;
    }

    fn button(key: &str, label: &str, enabled: bool) -> Vec<Span<'static>> {
        vec![
            Span::styled(key.to_string(), Styles::button(enabled)),
            Span::styled(format!(" {label}  "), Styles::dimmed()),
        ]
    }
}

impl Component for PagerBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        spans.extend(Self::button("↑", "newer", self.can_step_back));
        spans.extend(Self::button("↓", "older", self.can_step_forward));

        let list_label = if self.list_visible { "hide list" } else { "list" };
        spans.extend(Self::button("Tab", list_label, self.can_show_list));
        if self.can_choose_sender {
            spans.extend(Self::button("F2", "from", true));
        }
        if self.can_choose_date {
            spans.extend(Self::button("F3", "date", true));
        }
        if !self.counter.is_empty() {
            spans.push(Span::styled(self.counter.clone(), Styles::title()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up if self.can_step_back => Some(Message::StepBack),
            KeyCode::Char('p') if ctrl && self.can_step_back => Some(Message::StepBack),
            KeyCode::Down if self.can_step_forward => Some(Message::StepForward),
            KeyCode::Char('n') if ctrl && self.can_step_forward => Some(Message::StepForward),
            KeyCode::Tab if self.can_show_list => Some(Message::ToggleList),
            KeyCode::F(2) if self.can_choose_sender => Some(Message::ShowSenderPicker),
            KeyCode::F(3) if self.can_choose_date => Some(Message::ShowCalendar),
            _ => None,
        }
    }
}
