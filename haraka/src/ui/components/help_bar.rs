//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Locale;
use crate::ui::theme;

/// Render a standard help bar with the given text.
///
/// Gray, centered text in a bordered block. All screens use this for
/// their key hints.
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

/// Join `key: action` hints with the trailing "? help" hint.
pub fn hints(locale: &Locale, pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, action_key)| format!("{}: {}", key, locale.t(action_key)))
        .chain(std::iter::once(format!("?: {}", locale.t("hint.help"))))
        .collect::<Vec<_>>()
        .join(" | ")
}
