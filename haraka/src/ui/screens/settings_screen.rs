use haraka_api::endpoints::parents::Parent;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::i18n::Locale;
use crate::state::{SettingsField, SettingsState};
use crate::ui::{
    components::{help_bar, screen_title, text_input},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &SettingsState, parent: Option<&Parent>, locale: &Locale) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, locale.t("settings.title"), &state.saving);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(theme::INPUT_HEIGHT),
            Constraint::Min(0),
        ])
        .split(content_area);

    render_fields(f, chunks[0], state, parent, locale);
    if state.editing_phone {
        text_input::render_text_input(
            f,
            chunks[1],
            locale.t("settings.phone"),
            &state.phone_input,
            true,
        );
    }

    let hints = if state.editing_phone {
        help_bar::hints(locale, &[("Enter", "hint.save"), ("Esc", "hint.cancel")])
    } else {
        help_bar::hints(
            locale,
            &[("j/k", "hint.select"), ("Enter", "hint.change"), ("h", "hint.back")],
        )
    };
    help_bar::render_help_bar(f, help_area, &hints);
}

fn render_fields(
    f: &mut Frame,
    area: Rect,
    state: &SettingsState,
    parent: Option<&Parent>,
    locale: &Locale,
) {
    let phone = parent
        .and_then(|p| p.phone.clone())
        .unwrap_or_else(|| locale.t("settings.phone_missing").to_string());
    let email = parent
        .and_then(|p| p.email.clone())
        .unwrap_or_else(|| "-".to_string());

    let rows = vec![
        Row::new(vec![
            Cell::from(locale.t("settings.language")),
            Cell::from(locale.language().native_name()),
        ]),
        Row::new(vec![Cell::from(locale.t("settings.phone")), Cell::from(phone)]),
        Row::new(vec![Cell::from(locale.t("settings.email")), Cell::from(email)])
            .style(theme::help_text_style()),
    ];

    let selected = match state.focus {
        SettingsField::Language => 0,
        SettingsField::Phone => 1,
    };

    let table = Table::new(rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
        .column_spacing(theme::TABLE_COLUMN_SPACING)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(locale.t("settings.preferences")),
        )
        .row_highlight_style(theme::selection_style());

    let mut table_state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut table_state);
}
