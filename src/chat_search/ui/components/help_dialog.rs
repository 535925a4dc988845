use crate::chat_search::constants::{DIALOG_MARGIN, DIALOG_MAX_WIDTH};
use crate::chat_search::ui::components::{
    Component,
    view_layout::{Styles, centered_rect},
};
use crate::chat_search::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

#[derive(Default)]
pub struct HelpDialog;

impl HelpDialog {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text() -> Vec<Line<'static>> {
        let section = |title: &'static str| Line::from(Span::styled(title, Styles::label()));
        vec![
            Line::from(Span::styled("Conversation Search", Styles::title())),
            Line::from(""),
            section("Query:"),
            Line::from("  Type        - Search as you type"),
            Line::from("  Enter       - Search now"),
            Line::from("  Backspace   - Remove the sender filter (empty query)"),
            Line::from("  F2          - Search messages from one sender"),
            Line::from("  F3          - Jump to a date"),
            Line::from(""),
            section("Results:"),
            Line::from("  ↑ / Ctrl+P  - Newer result"),
            Line::from("  ↓ / Ctrl+N  - Older result"),
            Line::from("  Tab         - Show or hide all results"),
            Line::from("  Enter       - Jump to the selected result"),
            Line::from(""),
            Line::from("  F1          - Show this help"),
            Line::from("  Esc         - Close search"),
            Line::from(""),
            Line::from("Press any key to close this help..."),
        ]
    }
}

impl Component for HelpDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let help_text = Self::get_help_text();
        let height = help_text.len() as u16 + 2;
        let dialog_area = centered_rect(area, DIALOG_MAX_WIDTH, height, DIALOG_MARGIN);

        // Clear the area behind the dialog
        f.render_widget(Clear, dialog_area);

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Styles::title()),
            )
            .style(Styles::normal())
            .alignment(Alignment::Left);

        f.render_widget(help, dialog_area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        // Any key closes the help dialog
        Some(Message::CloseHelp)
    }
}
