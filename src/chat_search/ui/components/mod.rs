pub mod conversation_view;
pub mod date_prompt;
pub mod help_dialog;
pub mod pager_bar;
pub mod result_list;
pub mod search_bar;
pub mod sender_picker;
pub mod text_input;
pub mod view_layout;

#[cfg(test)]
mod conversation_view_test;

use crate::chat_search::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Message>;
}

/// Draw a component on a `TestBackend` and return the screen, one line per row
#[cfg(test)]
pub(crate) fn render_to_string(component: &mut dyn Component, width: u16, height: u16) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| component.render(f, f.area())).unwrap();

    let buffer = terminal.backend().buffer();
    let mut lines = Vec::new();
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            line.push_str(buffer.cell((x, y)).unwrap().symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
