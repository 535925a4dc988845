use crate::chat_search::ui::components::{
    Component, text_input::TextInput, view_layout::Styles,
};
use crate::chat_search::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Query field with the optional sender chip in front of it
#[derive(Default)]
pub struct SearchBar {
    input: TextInput,
    chip: Option<String>,
    is_searching: bool,
    message: Option<String>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync with the query the orchestrator holds. The cursor is kept when
    /// the text did not change.
    pub fn set_query(&mut self, query: &str) {
        if self.input.text() != query {
            self.input.set_text(query.to_string());
        }
    }

    pub fn set_chip(&mut self, chip: Option<String>) {
        self.chip = chip;
    }

    pub fn set_searching(&mut self, is_searching: bool) {
        self.is_searching = is_searching;
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }
}

impl Component for SearchBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if let Some(chip) = &self.chip {
            spans.push(Span::styled(format!(" {chip} "), Styles::chip()));
            spans.push(Span::raw(" "));
        }
        spans.extend(self.input.render_cursor_spans());

        let mut title = "Search".to_string();
        if let Some(msg) = &self.message {
            title.push_str(&format!(" - {msg}"));
        }

        let input = Paragraph::new(Line::from(spans))
            .block(Block::default().title(title).borders(Borders::ALL))
            .style(Style::default().fg(Color::Yellow));

        f.render_widget(input, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => Some(Message::SubmitQuery),
            // Backspace on an empty query removes the sender chip
            KeyCode::Backspace if self.input.is_empty() && self.chip.is_some() => {
                self.chip = None;
                Some(Message::SenderChosen(None))
            }
            _ => {
                if self.input.handle_key(key) {
                    Some(Message::QueryChanged(self.input.text().to_string()))
                } else {
                    None
                }
            }
        }
    }
}
