use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::i18n::Locale;
use crate::ui::{layouts, theme};

/// Yes/no popup with a question and optional detail lines.
///
/// `danger` switches to the red border used for destructive actions.
pub fn render_confirm_dialog(
    f: &mut Frame,
    locale: &Locale,
    title: &str,
    question: &str,
    details: &[(String, String)],
    danger: bool,
) {
    let (size, border_style) = if danger {
        (layouts::popup_sizes::SMALL, theme::danger_border_style())
    } else {
        (layouts::popup_sizes::MEDIUM, theme::info_border_style())
    };

    let inner = super::popup::render_popup_frame(f, f.area(), size, title, border_style);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(details.len() as u16),
            Constraint::Length(1),
        ])
        .split(inner);

    let question = Paragraph::new(question)
        .style(theme::loading_style().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(question, chunks[0]);

    if !details.is_empty() {
        let lines: Vec<Line> = details
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), theme::help_text_style()),
                    Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
    }

    let instructions = Line::from(vec![
        Span::styled(
            format!("[Y] {} ", locale.t("confirm.yes")),
            Style::default()
                .fg(theme::COLOR_POSITIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("/ "),
        Span::styled(
            format!("[N] {} ", locale.t("confirm.no")),
            Style::default()
                .fg(theme::COLOR_NEGATIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("/ "),
        Span::styled("[Esc]", Style::default().fg(theme::COLOR_HELP_TEXT)),
        Span::raw(format!(" {}", locale.t("confirm.cancel"))),
    ]);
    f.render_widget(
        Paragraph::new(instructions).alignment(Alignment::Center),
        chunks[2],
    );
}
