use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
};

// Helper struct for consistent color scheme
pub struct ColorScheme;

impl ColorScheme {
    pub const PRIMARY: Color = Color::Cyan;
    pub const SECONDARY: Color = Color::Yellow;
    pub const ACCENT: Color = Color::Magenta;
    pub const TEXT: Color = Color::White;
    pub const TEXT_DIM: Color = Color::DarkGray;
    pub const SELECTION: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Red;
}

// Helper struct for consistent styling
pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default()
            .fg(ColorScheme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default().fg(ColorScheme::SECONDARY)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(ColorScheme::SELECTION)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(ColorScheme::TEXT)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(ColorScheme::TEXT_DIM)
    }

    pub fn action_key() -> Style {
        Style::default().fg(ColorScheme::SECONDARY)
    }

    /// Sender filter chip next to the query
    pub fn chip() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(ColorScheme::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Query match inside a message
    pub fn highlight() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(ColorScheme::SECONDARY)
    }

    /// The message the conversation was jumped to
    pub fn focused() -> Style {
        Style::default()
            .fg(ColorScheme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(ColorScheme::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Affordance style for a button that may be disabled
    pub fn button(enabled: bool) -> Style {
        if enabled {
            Self::action_key()
        } else {
            Self::dimmed()
        }
    }
}

/// Rectangle of at most `width` x `height`, centered in `area` with `margin`
/// cells left free on every side
pub fn centered_rect(area: Rect, width: u16, height: u16, margin: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(margin * 2)).max(1);
    let height = height.min(area.height.saturating_sub(margin * 2)).max(1);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// `2024-01-05T10:30:00Z` -> `2024-01-05 10:30`; unparsable dates pass through
pub fn format_date(date: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Cut `text` to at most `width` characters on one line, with an ellipsis
pub fn truncate_line(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = flat.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
