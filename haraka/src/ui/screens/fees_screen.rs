use chrono::NaiveDate;
use haraka_api::endpoints::fee_assignments::{FeeAssignment, Installment, PlanType};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::i18n::{
    format::{format_currency, format_date},
    Locale,
};
use crate::payments::plan::monthly_amount;
use crate::state::{FeesState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title, status_badge, student_card},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &FeesState, today: NaiveDate, locale: &Locale) {
    let (title_area, card_area, content_area, help_area) =
        layouts::student_screen_layout(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        locale.t("fees.title"),
        &LoadingState::NotStarted,
    );
    student_card::render_student_card(f, card_area, &state.student, locale);

    match state.assignment {
        Some(ref assignment) => {
            render_assignment(f, content_area, state, assignment, today, locale)
        }
        None => empty_state::render_empty_state(
            f,
            content_area,
            locale.t("fees.title"),
            locale.t("fees.no_assignment"),
            Some(locale.t("fees.no_assignment_hint")),
        ),
    }

    help_bar::render_help_bar(
        f,
        help_area,
        &help_bar::hints(
            locale,
            &[
                ("j/k", "hint.select"),
                ("Enter", "hint.pay_installment"),
                ("p", "hint.pay"),
                ("t", "hint.history"),
                ("h", "hint.back"),
            ],
        ),
    );
}

fn render_assignment(
    f: &mut Frame,
    area: Rect,
    state: &FeesState,
    assignment: &FeeAssignment,
    today: NaiveDate,
    locale: &Locale,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_overview(f, chunks[0], assignment, locale);

    let plan_type = assignment.payment_plan.as_ref().map(|p| p.plan_type());
    match plan_type {
        Some(PlanType::Installment) => render_installments(f, chunks[1], state, today, locale),
        Some(PlanType::Monthly) => {
            let text = locale.tf(
                "fees.monthly_detail",
                &[(
                    "amount",
                    format_currency(monthly_amount(assignment.total_due), locale).as_str(),
                )],
            );
            render_plan_note(f, chunks[1], &text, locale);
        }
        Some(PlanType::OneTime) => {
            let text = locale.tf(
                "fees.one_time_detail",
                &[("amount", format_currency(assignment.balance(), locale).as_str())],
            );
            render_plan_note(f, chunks[1], &text, locale);
        }
        None => render_plan_note(f, chunks[1], locale.t("fees.no_plan"), locale),
    }
}

fn render_overview(f: &mut Frame, area: Rect, assignment: &FeeAssignment, locale: &Locale) {
    let plan_label = assignment
        .payment_plan
        .as_ref()
        .map(|p| {
            let name = locale.t(status_badge::plan_type_key(p.plan_type())).to_string();
            match p.discount_percentage {
                Some(discount) if discount > 0.0 => format!("{} (-{}%)", name, discount),
                _ => name,
            }
        })
        .unwrap_or_else(|| "-".to_string());

    let balance = assignment.balance();
    let label =
        |key: &str| Span::styled(format!("{}: ", locale.t(key)), theme::help_text_style());

    let lines = vec![
        Line::from(vec![
            label("fees.plan"),
            Span::raw(plan_label),
            Span::raw("   "),
            status_badge::assignment_status_badge(assignment.status, locale),
        ]),
        Line::from(vec![
            label("fees.total_due"),
            Span::raw(format_currency(assignment.total_due, locale)),
            Span::raw("   "),
            label("fees.paid"),
            Span::styled(
                format_currency(assignment.paid_amount, locale),
                Style::default().fg(theme::COLOR_POSITIVE),
            ),
        ]),
        Line::from(vec![
            label("fees.balance"),
            Span::styled(
                format_currency(balance, locale),
                Style::default()
                    .fg(theme::balance_color(balance))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(locale.t("fees.summary")),
    );
    f.render_widget(paragraph, area);
}

fn render_plan_note(f: &mut Frame, area: Rect, text: &str, locale: &Locale) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::raw(text.to_string())),
        Line::from(""),
        Line::from(Span::styled(locale.t("fees.pay_hint"), theme::help_text_style())),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(locale.t("fees.schedule")));
    f.render_widget(paragraph, area);
}

fn render_installments(
    f: &mut Frame,
    area: Rect,
    state: &FeesState,
    today: NaiveDate,
    locale: &Locale,
) {
    let installments = state.installments();
    if installments.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            locale.t("fees.schedule"),
            locale.t("payment.error.empty_schedule"),
            None,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from(locale.t("fees.column.due_date")),
        Cell::from(Text::from(locale.t("fees.column.amount")).right_aligned()),
        Cell::from(locale.t("fees.column.status")),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = installments
        .iter()
        .map(|installment| {
            let (status_key, color) = installment_status(installment, today);
            Row::new(vec![
                Cell::from(installment.installment_number.to_string()),
                Cell::from(format_date(installment.due_date, locale)),
                Cell::from(
                    Text::from(format_currency(installment.amount, locale)).right_aligned(),
                ),
                Cell::from(locale.t(status_key)).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(Block::default().borders(Borders::ALL).title(locale.t("fees.schedule")))
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn installment_status(installment: &Installment, today: NaiveDate) -> (&'static str, Color) {
    if installment.paid {
        ("fees.installment.paid", theme::COLOR_POSITIVE)
    } else if installment.due_date < today {
        ("fees.installment.overdue", theme::COLOR_NEGATIVE)
    } else {
        ("fees.installment.upcoming", theme::COLOR_LOADING)
    }
}
