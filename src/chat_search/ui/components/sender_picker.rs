use crate::chat_search::constants::{DIALOG_MARGIN, DIALOG_MAX_WIDTH};
use crate::chat_search::domain::models::SenderId;
use crate::chat_search::ui::components::{
    Component,
    view_layout::{Styles, centered_rect},
};
use crate::chat_search::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Stand-in for the host's participant picker
#[derive(Default)]
pub struct SenderPicker {
    senders: Vec<SenderId>,
    selected: usize,
}

impl SenderPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_senders(&mut self, senders: Vec<SenderId>) {
        self.senders = senders;
        self.selected = 0;
    }

    pub fn selected(&self) -> Option<&SenderId> {
        self.senders.get(self.selected)
    }
}

impl Component for SenderPicker {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let height = self.senders.len().max(1) as u16 + 2;
        let dialog_area = centered_rect(area, DIALOG_MAX_WIDTH, height, DIALOG_MARGIN);

        let visible = dialog_area.height.saturating_sub(2) as usize;
        let offset = (self.selected + 1).saturating_sub(visible);
        let lines: Vec<Line> = if self.senders.is_empty() {
            vec![Line::from(Span::styled("No senders", Styles::dimmed()))]
        } else {
            self.senders
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(index, sender)| {
                    let style = if index == self.selected {
                        Styles::selected()
                    } else {
                        Styles::normal()
                    };
                    Line::from(Span::styled(sender.to_string(), style))
                })
                .collect()
        };

        f.render_widget(Clear, dialog_area);
        let picker = Paragraph::new(lines).block(
            Block::default()
                .title(" Search messages from ")
                .borders(Borders::ALL)
                .border_style(Styles::title()),
        );
        f.render_widget(picker, dialog_area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('p') if ctrl => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.senders.len().saturating_sub(1));
                None
            }
            KeyCode::Char('n') if ctrl => {
                self.selected = (self.selected + 1).min(self.senders.len().saturating_sub(1));
                None
            }
            KeyCode::Enter => self
                .selected()
                .cloned()
                .map(|sender| Message::SenderChosen(Some(sender))),
            KeyCode::Esc => Some(Message::CloseDialog),
            _ => None,
        }
    }
}
