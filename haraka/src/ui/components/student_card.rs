//! Header card identifying the student a screen is about.

use haraka_api::endpoints::students::Student;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Locale;
use crate::ui::theme;

pub fn render_student_card(f: &mut Frame, area: Rect, student: &Student, locale: &Locale) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(6), Constraint::Min(10)])
        .split(inner);

    let avatar = Paragraph::new(Span::styled(
        format!(" {} ", student.initials()),
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(theme::COLOR_TITLE)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(avatar, chunks[0]);

    let lines = vec![
        Line::from(Span::styled(
            student.full_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(details(student, locale), theme::help_text_style())),
    ];
    f.render_widget(Paragraph::new(lines), chunks[1]);
}

/// Grade, school and registration number, whichever are known.
fn details(student: &Student, locale: &Locale) -> String {
    let mut parts = Vec::new();
    if let Some(ref grade) = student.grade_level {
        parts.push(format!("{} {}", locale.t("student.grade"), grade));
    }
    if let Some(ref school) = student.school_name {
        parts.push(school.clone());
    }
    if let Some(ref number) = student.registration_number {
        parts.push(format!("#{}", number));
    }
    parts.join(" · ")
}
