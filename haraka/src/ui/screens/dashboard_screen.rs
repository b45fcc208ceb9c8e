use haraka_api::endpoints::{
    academic_years::AcademicYear, fee_assignments::FeeAssignment, parents::Parent, Money,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::i18n::{format::format_currency, Locale};
use crate::state::{DashboardState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title, status_badge},
    layouts, theme,
};

pub fn render(
    f: &mut Frame,
    state: &DashboardState,
    parent: Option<&Parent>,
    academic_year: Option<&AcademicYear>,
    locale: &Locale,
) {
    let (title_area, summary_area, content_area, help_area) =
        layouts::screen_layout_with_summary(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        &title(parent, academic_year, locale),
        &state.loading,
    );
    render_summary(f, summary_area, state, locale);
    render_students(f, content_area, state, locale);
    help_bar::render_help_bar(
        f,
        help_area,
        &help_bar::hints(
            locale,
            &[
                ("Enter", "hint.fees"),
                ("p", "hint.pay"),
                ("t", "hint.history"),
                ("a", "hint.link"),
                ("u", "hint.unlink"),
                ("s", "hint.settings"),
                ("q", "hint.quit"),
            ],
        ),
    );
}

fn title(
    parent: Option<&Parent>,
    academic_year: Option<&AcademicYear>,
    locale: &Locale,
) -> String {
    let greeting = match parent {
        Some(parent) => locale.tf("dashboard.greeting", &[("name", parent.first_name.as_str())]),
        None => "HarakaPay".to_string(),
    };

    match academic_year.and_then(|y| y.name.as_deref()) {
        Some(year) => format!("{} · {}", greeting, year),
        None => greeting,
    }
}

/// Totals across every linked student with an assignment this year.
fn totals(state: &DashboardState) -> (Money, Money, Money) {
    state
        .assignments
        .values()
        .fold(
            (Money::ZERO, Money::ZERO, Money::ZERO),
            |(due, paid, balance), a| (due + a.total_due, paid + a.paid_amount, balance + a.balance()),
        )
}

fn render_summary(f: &mut Frame, area: Rect, state: &DashboardState, locale: &Locale) {
    let (due, paid, balance) = totals(state);
    let cards = layouts::summary_cards(area, 3);

    render_card(
        f,
        cards[0],
        &format_currency(due, locale),
        locale.t("dashboard.total_due"),
        theme::COLOR_TITLE,
    );
    render_card(
        f,
        cards[1],
        &format_currency(paid, locale),
        locale.t("dashboard.total_paid"),
        theme::COLOR_POSITIVE,
    );
    render_card(
        f,
        cards[2],
        &format_currency(balance, locale),
        locale.t("dashboard.balance"),
        theme::balance_color(balance),
    );
}

fn render_card(f: &mut Frame, area: Rect, amount: &str, label: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL).title(label);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(Span::styled(
        amount,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

fn render_students(f: &mut Frame, area: Rect, state: &DashboardState, locale: &Locale) {
    let title = locale.t("dashboard.students");

    if state.students.is_empty() {
        match state.loading {
            LoadingState::Loading(_) | LoadingState::NotStarted => {
                empty_state::render_loading_state(f, area, title, locale.t("dashboard.loading"));
            }
            LoadingState::Error(ref message) => {
                empty_state::render_error_state(
                    f,
                    area,
                    title,
                    message,
                    locale.t("dashboard.retry_hint"),
                );
            }
            LoadingState::Loaded => {
                empty_state::render_empty_state(
                    f,
                    area,
                    title,
                    locale.t("dashboard.no_students"),
                    Some(locale.t("dashboard.no_students_hint")),
                );
            }
        }
        return;
    }

    let header = Row::new(vec![
        Cell::from(locale.t("dashboard.column.student")),
        Cell::from(locale.t("dashboard.column.grade")),
        Cell::from(locale.t("dashboard.column.school")),
        Cell::from(Text::from(locale.t("dashboard.column.balance")).right_aligned()),
        Cell::from(locale.t("dashboard.column.status")),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = state
        .students
        .iter()
        .map(|student| {
            let assignment = state.assignment_for(student.id);
            let (balance_cell, status_cell) = assignment_cells(assignment, locale);

            Row::new(vec![
                Cell::from(student.full_name()),
                Cell::from(student.grade_level.clone().unwrap_or_default()),
                Cell::from(student.school_name.clone().unwrap_or_default()),
                balance_cell,
                status_cell,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(10),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(theme::selection_style());

    let mut table_state = TableState::default().with_selected(Some(state.selected_index));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn assignment_cells<'a>(
    assignment: Option<&FeeAssignment>,
    locale: &'a Locale,
) -> (Cell<'a>, Cell<'a>) {
    match assignment {
        Some(assignment) => {
            let balance = assignment.balance();
            (
                Cell::from(Text::from(format_currency(balance, locale)).right_aligned())
                    .style(Style::default().fg(theme::balance_color(balance))),
                Cell::from(Line::from(status_badge::assignment_status_badge(
                    assignment.status,
                    locale,
                ))),
            )
        }
        None => (
            Cell::from(Text::from("-").right_aligned()),
            Cell::from(locale.t("dashboard.no_fees")).style(theme::help_text_style()),
        ),
    }
}
