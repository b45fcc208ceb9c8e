use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};
use tracing::Level;

use crate::i18n::Locale;
use crate::log_buffer::LogBuffer;
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer, locale: &Locale) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = locale.tf(
        "logs.title",
        &[("count", state.total_entries.to_string().as_str())],
    );
    f.render_widget(
        ratatui::widgets::Paragraph::new(title).style(theme::title_style()),
        title_area,
    );
    render_logs(f, content_area, state, log_buffer, locale);
    render_help(f, help_area, state, locale);
}

fn level_style(level: Level) -> (&'static str, Style) {
    match level {
        Level::ERROR => (
            "ERROR",
            Style::default()
                .fg(theme::COLOR_NEGATIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Level::WARN => ("WARN ", Style::default().fg(theme::COLOR_LOADING)),
        Level::INFO => ("INFO ", Style::default().fg(theme::COLOR_POSITIVE)),
        Level::DEBUG => ("DEBUG", Style::default().fg(Color::Blue)),
        Level::TRACE => ("TRACE", Style::default().fg(theme::COLOR_ZERO)),
    }
}

fn render_logs(
    f: &mut Frame,
    area: Rect,
    state: &LogsState,
    log_buffer: &LogBuffer,
    locale: &Locale,
) {
    let entries = log_buffer.get_entries();
    let total = entries.len();

    if total == 0 {
        empty_state::render_empty_state(
            f,
            area,
            locale.t("logs.session"),
            locale.t("logs.empty"),
            None,
        );
        return;
    }

    // Newest entries sit at the bottom; the offset counts rows scrolled up from there.
    let inner_height = area.height.saturating_sub(4) as usize;
    let offset = state.scroll_offset.min(total.saturating_sub(1));
    let end = total - offset;
    let start = end.saturating_sub(inner_height);

    let rows: Vec<Row> = entries[start..end]
        .iter()
        .map(|entry| {
            let (label, style) = level_style(entry.level);
            Row::new(vec![
                entry.timestamp.format("%H:%M:%S%.3f").to_string(),
                label.to_string(),
                truncate_target(&entry.target, 25),
                entry.message.clone(),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(25),
        Constraint::Min(30),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} [{}-{} / {}] ",
            locale.t("logs.session"),
            start + 1,
            end,
            total
        )))
        .header(
            Row::new(vec!["Time", "Level", "Target", "Message"])
                .style(theme::header_style())
                .bottom_margin(1),
        );

    f.render_widget(table, area);
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState, locale: &Locale) {
    let mut text = help_bar::hints(
        locale,
        &[
            ("j/k", "hint.scroll"),
            ("PgUp/PgDn", "hint.page"),
            ("Home/End", "hint.ends"),
            ("h", "hint.back"),
        ],
    );
    if state.scroll_offset > 0 {
        text.push_str(&format!(" (+{})", state.scroll_offset));
    }

    help_bar::render_help_bar(f, area, &text);
}

/// Keep the tail of long module paths, which is the informative part.
fn truncate_target(target: &str, max_len: usize) -> String {
    let count = target.chars().count();
    if count <= max_len {
        target.to_string()
    } else {
        let tail: String = target.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_tail() {
        assert_eq!(truncate_target("haraka::app", 25), "haraka::app");
        let long = "haraka::background::data_loader";
        let truncated = truncate_target(long, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.ends_with("data_loader"));
    }
}
