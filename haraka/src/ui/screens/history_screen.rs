use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::i18n::{
    format::{format_currency, format_date_time},
    Locale,
};
use crate::state::{HistoryState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title, status_badge, student_card},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &HistoryState, locale: &Locale) {
    let (title_area, card_area, content_area, help_area) =
        layouts::student_screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, locale.t("history.title"), &state.loading);
    student_card::render_student_card(f, card_area, &state.student, locale);
    render_content(f, content_area, state, locale);
    help_bar::render_help_bar(
        f,
        help_area,
        &help_bar::hints(
            locale,
            &[("j/k", "hint.select"), ("r", "hint.refresh"), ("h", "hint.back")],
        ),
    );
}

fn render_content(f: &mut Frame, area: Rect, state: &HistoryState, locale: &Locale) {
    let title = locale.t("history.title");

    if state.payments.is_empty() {
        match state.loading {
            LoadingState::Loading(_) => {
                empty_state::render_loading_state(f, area, title, locale.t("history.loading"))
            }
            LoadingState::Error(ref message) => empty_state::render_error_state(
                f,
                area,
                title,
                message,
                locale.t("history.retry_hint"),
            ),
            LoadingState::NotStarted | LoadingState::Loaded => {
                empty_state::render_empty_state(f, area, title, locale.t("history.empty"), None)
            }
        }
        return;
    }

    let header = Row::new(vec![
        Cell::from(locale.t("history.column.date")),
        Cell::from(Text::from(locale.t("history.column.amount")).right_aligned()),
        Cell::from(locale.t("history.column.status")),
        Cell::from(locale.t("history.column.method")),
        Cell::from(locale.t("history.column.reference")),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = state
        .payments
        .iter()
        .map(|payment| {
            let created = payment.created_at.with_timezone(&chrono::Local).naive_local();
            let method = match payment.installment_number {
                Some(number) => format!(
                    "{} #{}",
                    payment.payment_method.as_deref().unwrap_or("-"),
                    number
                ),
                None => payment.payment_method.clone().unwrap_or_else(|| "-".to_string()),
            };

            Row::new(vec![
                Cell::from(format_date_time(created, locale)),
                Cell::from(Text::from(format_currency(payment.amount, locale)).right_aligned()),
                Cell::from(Line::from(status_badge::payment_status_badge(
                    payment.status,
                    locale,
                ))),
                Cell::from(method),
                Cell::from(payment.transaction_id.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(Block::default().borders(Borders::ALL).title(format!(
        "{} ({})",
        title,
        state.payments.len()
    )))
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}
