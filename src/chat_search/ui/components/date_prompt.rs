use crate::chat_search::constants::{DIALOG_MARGIN, DIALOG_MAX_WIDTH};
use crate::chat_search::ui::components::{
    Component,
    text_input::TextInput,
    view_layout::{Styles, centered_rect},
};
use crate::chat_search::ui::events::Message;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Stand-in for the host's calendar: asks for a `YYYY-MM-DD` date
#[derive(Default)]
pub struct DatePrompt {
    input: TextInput,
    error: Option<String>,
}

impl DatePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn submit(&mut self) -> Option<Message> {
        match NaiveDate::parse_from_str(self.input.text().trim(), "%Y-%m-%d") {
            Ok(date) => {
                self.error = None;
                Some(Message::DateChosen(date))
            }
            Err(e) => {
                self.error = Some(format!("Invalid date: {e}"));
                None
            }
        }
    }
}

impl Component for DatePrompt {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let dialog_area = centered_rect(area, DIALOG_MAX_WIDTH, 5, DIALOG_MARGIN);

        let mut spans = vec![Span::styled("Date: ", Styles::label())];
        spans.extend(self.input.render_cursor_spans());
        let mut lines = vec![Line::from(spans)];
        match &self.error {
            Some(error) => lines.push(Line::from(Span::styled(error.clone(), Styles::error()))),
            None => lines.push(Line::from(Span::styled(
                "YYYY-MM-DD, Enter to jump, Esc to cancel",
                Styles::dimmed(),
            ))),
        }

        f.render_widget(Clear, dialog_area);
        let prompt = Paragraph::new(lines).block(
            Block::default()
                .title(" Jump to date ")
                .borders(Borders::ALL)
                .border_style(Styles::title()),
        );
        f.render_widget(prompt, dialog_area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => Some(Message::CloseDialog),
            _ => {
                if self.input.handle_key(key) {
                    self.error = None;
                }
                None
            }
        }
    }
}
