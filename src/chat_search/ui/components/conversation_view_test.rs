#[cfg(test)]
mod tests {
    use super::super::conversation_view::*;
    use super::super::{Component, render_to_string};
    use crate::chat_search::test_support::create_message;
    use ratatui::{Terminal, backend::TestBackend, style::Color};

    #[test]
    fn test_empty_view() {
        let mut view = ConversationView::new();
        view.set_title("Team".to_string());

        let content = render_to_string(&mut view, 40, 5);
        assert!(content.contains("Team"));
        assert!(content.contains("No messages"));
    }

    #[test]
    fn test_focused_message_is_marked() {
        let mut view = ConversationView::new();
        view.set_messages(
            vec![
                create_message(1, "alice", "first"),
                create_message(2, "bob", "second"),
            ],
            Some(2),
        );

        let content = render_to_string(&mut view, 50, 8);
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines.iter().any(|line| line.contains("▶ bob")));
        assert!(lines.iter().any(|line| line.contains("  alice") && !line.contains('▶')));
        assert!(content.contains("second"));
    }

    #[test]
    fn test_query_matches_are_highlighted() {
        let mut view = ConversationView::new();
        view.set_messages(vec![create_message(1, "alice", "Deploy the deploy")], None);
        view.set_query("DEPLOY");

        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();

        // Text starts after the border and the four-space indent
        let highlighted: Vec<bool> = (5..22)
            .map(|x| buffer.cell((x, 2)).unwrap().bg == Color::Yellow)
            .collect();
        assert!(highlighted[0..6].iter().all(|&h| h));
        assert!(!highlighted[6]);
        assert!(highlighted[11..17].iter().all(|&h| h));
    }

    #[test]
    fn test_regex_metacharacters_in_query() {
        let mut view = ConversationView::new();
        view.set_messages(vec![create_message(1, "bob", "is it (done)?")], None);
        view.set_query("(done)?");

        let content = render_to_string(&mut view, 40, 5);
        assert!(content.contains("is it (done)?"));
    }
}
