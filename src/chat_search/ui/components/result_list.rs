use crate::chat_search::constants::{DATE_COLUMN_WIDTH, LIST_PAGE_STEP, SENDER_COLUMN_WIDTH};
use crate::chat_search::domain::models::MessageRef;
use crate::chat_search::ui::components::{
    Component,
    view_layout::{Styles, format_date, truncate_line},
};
use crate::chat_search::ui::events::Message;
use crate::schemas::ChatMessage;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Display copy of one loaded result
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub id: MessageRef,
    pub from: String,
    pub date: String,
    pub text: String,
}

impl ResultRow {
    pub fn new(id: MessageRef, message: &ChatMessage) -> Self {
        Self {
            id,
            from: message.from.clone(),
            date: format_date(&message.date),
            text: message.text.clone(),
        }
    }
}

/// The expanded "all results" list. Rows the store could not resolve stay in
/// place as blank lines so indices keep matching the merged results.
#[derive(Default)]
pub struct ResultList {
    rows: Vec<Option<ResultRow>>,
    selected: usize,
    scroll_offset: usize,
    loaded: usize,
    total: Option<usize>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&mut self, rows: Vec<Option<ResultRow>>) {
        self.loaded = rows.len();
        self.rows = rows;
    }

    pub fn set_selection(&mut self, selected: usize, scroll_offset: usize) {
        self.selected = selected;
        self.scroll_offset = scroll_offset;
    }

    pub fn set_total(&mut self, total: Option<usize>) {
        self.total = total;
    }

    pub fn selected_row(&self) -> Option<&ResultRow> {
        self.rows.get(self.selected).and_then(Option::as_ref)
    }

    fn render_row(&self, index: usize, row: &ResultRow, width: usize) -> Line<'_> {
        let style = if index == self.selected {
            Styles::selected()
        } else {
            Styles::normal()
        };
        let fixed = (DATE_COLUMN_WIDTH + SENDER_COLUMN_WIDTH) as usize + 2;
        let text_width = width.saturating_sub(fixed);
        let sender = truncate_line(&row.from, SENDER_COLUMN_WIDTH as usize);

        Line::from(vec![
            Span::styled(
                format!("{:<width$} ", row.date, width = DATE_COLUMN_WIDTH as usize),
                Styles::dimmed(),
            ),
            Span::styled(
                format!("{:<width$} ", sender, width = SENDER_COLUMN_WIDTH as usize),
                Styles::label(),
            ),
            Span::styled(truncate_line(&row.text, text_width), style),
        ])
        .style(style)
    }
}

impl Component for ResultList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let title = match self.total {
            Some(total) => format!("Results ({} of {} loaded)", self.loaded, total),
            None => format!("Results ({} loaded)", self.loaded),
        };
        let block = Block::default()
            .title(Span::styled(title, Styles::title()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        let height = inner.height as usize;
        let width = inner.width as usize;

        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(height)
            .map(|(index, row)| match row {
                Some(row) => self.render_row(index, row, width),
                None => Line::from(""),
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up => Some(Message::BrowserMove(-1)),
            KeyCode::Down => Some(Message::BrowserMove(1)),
            KeyCode::Char('p') if ctrl => Some(Message::BrowserMove(-1)),
            KeyCode::Char('n') if ctrl => Some(Message::BrowserMove(1)),
            KeyCode::PageUp => Some(Message::BrowserMove(-LIST_PAGE_STEP)),
            KeyCode::PageDown => Some(Message::BrowserMove(LIST_PAGE_STEP)),
            KeyCode::Home => Some(Message::BrowserHome),
            KeyCode::End => Some(Message::BrowserEnd),
            KeyCode::Enter => Some(Message::BrowserActivate),
            KeyCode::Tab | KeyCode::Esc => Some(Message::ToggleList),
            _ => None,
        }
    }
}
