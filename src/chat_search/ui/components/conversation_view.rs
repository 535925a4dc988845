use crate::chat_search::ui::components::{
    Component,
    view_layout::{Styles, format_date},
};
use crate::chat_search::ui::events::Message;
use crate::schemas::ChatMessage;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use regex::{Regex, RegexBuilder};

/// The conversation pane: a window of messages around the one the search
/// jumped to, with query matches highlighted
#[derive(Default)]
pub struct ConversationView {
    title: String,
    messages: Vec<ChatMessage>,
    focused: Option<i64>,
    matcher: Option<Regex>,
}

impl ConversationView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_messages(&mut self, messages: Vec<ChatMessage>, focused: Option<i64>) {
        self.messages = messages;
        self.focused = focused;
    }

    pub fn set_query(&mut self, query: &str) {
        let query = query.trim();
        self.matcher = if query.is_empty() {
            None
        } else {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
                .ok()
        };
    }

    fn highlight<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        let Some(matcher) = &self.matcher else {
            return vec![Span::raw(text)];
        };
        let mut spans = Vec::new();
        let mut last = 0;
        for found in matcher.find_iter(text) {
            if found.start() > last {
                spans.push(Span::raw(&text[last..found.start()]));
            }
            spans.push(Span::styled(found.as_str(), Styles::highlight()));
            last = found.end();
        }
        if last < text.len() {
            spans.push(Span::raw(&text[last..]));
        }
        spans
    }

    fn message_lines<'a>(&self, message: &'a ChatMessage) -> Vec<Line<'a>> {
        let is_focused = self.focused == Some(message.id);
        let marker = if is_focused { "▶ " } else { "  " };
        let header_style = if is_focused {
            Styles::focused()
        } else {
            Styles::label()
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(marker, Styles::focused()),
            Span::styled(message.from.clone(), header_style),
            Span::styled(format!("  {}", format_date(&message.date)), Styles::dimmed()),
        ])];
        for text_line in message.text.lines() {
            let mut spans = vec![Span::raw("    ")];
            spans.extend(self.highlight(text_line));
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Component for ConversationView {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(self.title.clone(), Styles::title()))
            .borders(Borders::ALL);

        let lines: Vec<Line> = if self.messages.is_empty() {
            vec![Line::from(Span::styled("No messages", Styles::dimmed()))]
        } else {
            self.messages
                .iter()
                .flat_map(|message| self.message_lines(message))
                .collect()
        };

        // Keep the focused message inside the pane
        let inner_height = block.inner(area).height as usize;
        let focus_line = self
            .focused
            .and_then(|id| {
                let mut line = 0;
                for message in &self.messages {
                    if message.id == id {
                        return Some(line);
                    }
                    line += 1 + message.text.lines().count();
                }
                None
            })
            .unwrap_or(0);
        let scroll = focus_line.saturating_sub(inner_height / 3) as u16;

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        f.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        None
    }
}
