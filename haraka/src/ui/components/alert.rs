use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::i18n::Locale;
use crate::state::{Alert, AlertKind};
use crate::ui::{layouts, theme};

/// Modal alert drawn above everything else until dismissed.
pub fn render_alert(f: &mut Frame, alert: &Alert, locale: &Locale) {
    let border_style = match alert.kind {
        AlertKind::Success => theme::success_border_style(),
        AlertKind::Error => theme::danger_border_style(),
    };

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::SMALL,
        &alert.title,
        border_style,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(alert.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let dismiss = Line::from(Span::styled(
        format!("[Enter] {}", locale.t("alert.dismiss")),
        theme::help_text_style(),
    ));
    f.render_widget(Paragraph::new(dismiss).alignment(Alignment::Center), chunks[1]);
}
