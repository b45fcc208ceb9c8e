//! Single-line bordered input field.

use ratatui::prelude::Rect;
use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render `value` in a bordered field titled `label`. Focused fields get a
/// trailing cursor and the highlight style.
pub fn render_text_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let (text, style, border_style) = if focused {
        (
            format!("{}▏", value),
            theme::form_field_focused_style(),
            theme::accent_border_style(),
        )
    } else {
        (
            value.to_string(),
            theme::form_field_style(),
            ratatui::style::Style::default(),
        )
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label),
    );

    f.render_widget(input, area);
}

/// Render a value that cannot be edited, in the same frame as an input.
pub fn render_readonly_field(f: &mut Frame, area: Rect, label: &str, value: &str) {
    let field = Paragraph::new(value)
        .style(theme::form_field_readonly_style())
        .block(Block::default().borders(Borders::ALL).title(label));

    f.render_widget(field, area);
}
