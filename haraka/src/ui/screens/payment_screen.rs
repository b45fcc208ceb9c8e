use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::i18n::{
    format::{format_currency, format_date},
    Locale,
};
use crate::payments::{plan::monthly_amount, PayablePlan, ResolvedPlan};
use crate::state::{LoadingState, PaymentField, PaymentPhase, PaymentState};
use crate::ui::{
    components::{
        empty_state, help_bar, month_picker, screen_title, status_badge, student_card, text_input,
    },
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &PaymentState, locale: &Locale) {
    let (title_area, card_area, content_area, help_area) =
        layouts::student_screen_layout(f.area());

    let title_loading = if state.is_submitting() {
        LoadingState::loading()
    } else {
        state.resolution.clone()
    };
    screen_title::render_screen_title(f, title_area, locale.t("payment.title"), &title_loading);
    student_card::render_student_card(f, card_area, &state.student, locale);

    match (&state.resolution, &state.plan) {
        (LoadingState::Error(message), _) => empty_state::render_error_state(
            f,
            content_area,
            locale.t("payment.title"),
            message,
            locale.t("payment.retry_hint"),
        ),
        (LoadingState::Loaded, Some(plan)) => render_form(f, content_area, state, plan, locale),
        _ => empty_state::render_loading_state(
            f,
            content_area,
            locale.t("payment.title"),
            locale.t("payment.resolving"),
        ),
    }

    render_help(f, help_area, state, locale);
}

fn render_form(
    f: &mut Frame,
    area: Rect,
    state: &PaymentState,
    plan: &ResolvedPlan,
    locale: &Locale,
) {
    let is_monthly = matches!(plan.payable, PayablePlan::Monthly { .. });

    let mut constraints = vec![
        Constraint::Length(4),
        Constraint::Length(theme::INPUT_HEIGHT),
        Constraint::Length(theme::INPUT_HEIGHT),
    ];
    if is_monthly {
        constraints.push(Constraint::Length(theme::INPUT_HEIGHT));
    }
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_plan_summary(f, chunks[0], &plan.payable, locale);

    let editable = matches!(state.phase, PaymentPhase::Editing);
    let focused = |field: PaymentField| editable && state.form.focus == field;

    text_input::render_text_input(
        f,
        chunks[1],
        locale.t("payment.phone"),
        &state.form.phone,
        focused(PaymentField::Phone),
    );

    if plan.payable.amount_editable() {
        text_input::render_text_input(
            f,
            chunks[2],
            locale.t("payment.amount"),
            &state.form.amount,
            focused(PaymentField::Amount),
        );
    } else {
        let amount = plan
            .payable
            .amount()
            .map(|a| format_currency(a, locale))
            .unwrap_or_else(|| locale.t("payment.pick_month").to_string());
        text_input::render_readonly_field(f, chunks[2], locale.t("payment.amount"), &amount);
    }

    if is_monthly {
        month_picker::render_month_picker(
            f,
            chunks[3],
            locale.t("payment.month"),
            plan.payable.selected_month(),
            focused(PaymentField::Month),
            locale,
        );
    }

    if state.is_submitting() {
        let status = Paragraph::new(Span::styled(
            locale.t("payment.submitting"),
            theme::loading_style().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(status, chunks[chunks.len() - 1]);
    }
}

fn render_plan_summary(f: &mut Frame, area: Rect, payable: &PayablePlan, locale: &Locale) {
    let label =
        |key: &str| Span::styled(format!("{}: ", locale.t(key)), theme::help_text_style());

    let mut lines = vec![Line::from(vec![
        label("fees.plan"),
        Span::raw(locale.t(status_badge::plan_type_key(payable.plan_type())).to_string()),
    ])];

    match payable {
        PayablePlan::OneTime { total_due } => {
            lines.push(Line::from(vec![
                label("payment.amount_due"),
                Span::raw(format_currency(*total_due, locale)),
            ]));
        }
        PayablePlan::Monthly { total_due, .. } => {
            lines.push(Line::from(vec![
                label("fees.total_due"),
                Span::raw(format_currency(*total_due, locale)),
                Span::raw("   "),
                label("payment.per_month"),
                Span::raw(format_currency(monthly_amount(*total_due), locale)),
            ]));
        }
        PayablePlan::Installment { installment } => {
            lines.push(Line::from(vec![
                label("payment.installment"),
                Span::raw(format!("#{}", installment.installment_number)),
                Span::raw("   "),
                label("payment.due_date"),
                Span::raw(format_date(installment.due_date, locale)),
                Span::raw("   "),
                label("payment.amount_due"),
                Span::raw(format_currency(installment.amount, locale)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(locale.t("payment.details")),
    );
    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect, state: &PaymentState, locale: &Locale) {
    let text = match (&state.phase, &state.resolution) {
        (PaymentPhase::Submitting(_), _) => locale.t("payment.submitting").to_string(),
        (PaymentPhase::Confirming(_), _) => {
            help_bar::hints(locale, &[("y", "hint.confirm"), ("n", "hint.cancel")])
        }
        (PaymentPhase::Editing, LoadingState::Error(_)) => {
            help_bar::hints(locale, &[("r", "hint.retry"), ("Esc", "hint.back")])
        }
        (PaymentPhase::Editing, _) => help_bar::hints(
            locale,
            &[
                ("Tab", "hint.next_field"),
                ("←/→", "hint.month"),
                ("Enter", "hint.submit"),
                ("Esc", "hint.back"),
            ],
        ),
    };

    help_bar::render_help_bar(f, area, &text);
}
