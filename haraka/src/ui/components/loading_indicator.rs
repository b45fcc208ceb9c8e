use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::state::LoadingState;
use crate::ui::theme;

/// Spinner while loading, a check mark or cross once done, nothing before
/// the first load.
pub fn render_loading_indicator(f: &mut Frame, area: Rect, loading_state: &LoadingState) {
    if let LoadingState::Loading(throbber_state) = loading_state {
        let throbber = throbber_widgets_tui::Throbber::default()
            .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
        f.render_stateful_widget(throbber, area, &mut throbber_state.clone());
        return;
    }

    if let Some((symbol, color)) = settled_symbol(loading_state) {
        let indicator = Paragraph::new(Span::styled(symbol, Style::default().fg(color)))
            .alignment(Alignment::Right);
        f.render_widget(indicator, area);
    }
}

fn settled_symbol(loading_state: &LoadingState) -> Option<(&'static str, Color)> {
    match loading_state {
        LoadingState::Loaded => Some(("✓", theme::COLOR_POSITIVE)),
        LoadingState::Error(_) => Some(("x", theme::COLOR_NEGATIVE)),
        LoadingState::NotStarted | LoadingState::Loading(_) => None,
    }
}
