use haraka_api::endpoints::payments::PaymentStatus;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::i18n::{
    format::{format_currency, format_date_time},
    Locale,
};
use crate::state::PaymentStatusState;
use crate::ui::{
    components::{help_bar, screen_title, status_badge, student_card},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &PaymentStatusState, locale: &Locale) {
    let (title_area, card_area, content_area, help_area) =
        layouts::student_screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, locale.t("status.title"), &state.loading);
    student_card::render_student_card(f, card_area, &state.student, locale);
    render_details(f, content_area, state, locale);
    help_bar::render_help_bar(
        f,
        help_area,
        &help_bar::hints(locale, &[("r", "hint.refresh"), ("Enter", "hint.home")]),
    );
}

/// Status of the `payments` row, or pending until it has been read back.
fn current_status(state: &PaymentStatusState) -> PaymentStatus {
    state
        .payment
        .as_ref()
        .map(|p| p.status)
        .unwrap_or(PaymentStatus::Pending)
}

fn render_details(f: &mut Frame, area: Rect, state: &PaymentStatusState, locale: &Locale) {
    let status = current_status(state);
    let label =
        |key: &str| Span::styled(format!("{:<18}", locale.t(key)), theme::help_text_style());

    let mut lines = vec![
        Line::from(vec![
            label("status.state"),
            status_badge::payment_status_badge(status, locale),
        ]),
        Line::from(""),
        Line::from(vec![
            label("payment.amount"),
            Span::styled(
                format_currency(state.draft.amount, locale),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("payment.phone"),
            Span::raw(state.draft.phone_number.clone()),
        ]),
        Line::from(vec![
            label("status.transaction"),
            Span::raw(state.initiated.transaction_id.clone()),
        ]),
    ];

    if let Some(month) = state.draft.selected_month {
        lines.push(Line::from(vec![
            label("payment.month"),
            Span::raw(locale.t(month.label_key()).to_string()),
        ]));
    }
    if let Some(number) = state.draft.installment_number {
        lines.push(Line::from(vec![
            label("payment.installment"),
            Span::raw(format!("#{}", number)),
        ]));
    }
    if let Some(ref payment) = state.payment {
        let created = payment.created_at.with_timezone(&chrono::Local).naive_local();
        lines.push(Line::from(vec![
            label("status.created"),
            Span::raw(format_date_time(created, locale)),
        ]));
    }

    lines.push(Line::from(""));
    let hint_key = match status {
        PaymentStatus::Completed => "status.hint_completed",
        PaymentStatus::Failed | PaymentStatus::Cancelled => "status.hint_failed",
        _ => "status.hint_pending",
    };
    lines.push(Line::from(Span::styled(
        locale.t(hint_key),
        Style::default().fg(theme::payment_status_color(status)),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(locale.t("status.details")),
    );
    f.render_widget(paragraph, area);
}
