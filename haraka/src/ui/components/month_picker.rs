//! Horizontal picker over the ten school months.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Locale;
use crate::payments::{plan::SCHOOL_MONTHS, SchoolMonth};
use crate::ui::theme;

pub fn render_month_picker(
    f: &mut Frame,
    area: Rect,
    label: &str,
    selected: Option<SchoolMonth>,
    focused: bool,
    locale: &Locale,
) {
    let border_style = if focused {
        theme::accent_border_style()
    } else {
        Style::default()
    };

    let picker = Paragraph::new(month_line(selected, focused, locale)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label),
    );

    f.render_widget(picker, area);
}

fn month_line(selected: Option<SchoolMonth>, focused: bool, locale: &Locale) -> Line<'static> {
    let mut spans = Vec::with_capacity(SCHOOL_MONTHS.len() * 2 + 2);
    if focused {
        spans.push(Span::styled("◀ ", theme::help_text_style()));
    }

    for (i, month) in SCHOOL_MONTHS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let label = short_label(locale.t(month.label_key()));
        if Some(*month) == selected {
            let style = if focused {
                theme::form_field_focused_style()
            } else {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            };
            spans.push(Span::styled(format!("[{}]", label), style));
        } else {
            spans.push(Span::styled(label, theme::help_text_style()));
        }
    }

    if focused {
        spans.push(Span::styled(" ▶", theme::help_text_style()));
    }
    Line::from(spans)
}

/// First three letters of a month name.
fn short_label(name: &str) -> String {
    name.chars().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_month_is_bracketed() {
        let line = month_line(Some(SchoolMonth::October), false, &Locale::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("Sep [Oct] Nov"));
        assert!(text.ends_with("Jun"));
    }

    #[test]
    fn short_label_handles_accents() {
        assert_eq!(short_label("février"), "fév");
        assert_eq!(short_label("mai"), "mai");
    }
}
