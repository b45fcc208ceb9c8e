//! Colored status labels for payments and fee assignments.

use haraka_api::endpoints::{
    fee_assignments::{AssignmentStatus, PlanType},
    payments::PaymentStatus,
};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::i18n::Locale;
use crate::ui::theme;

pub fn payment_status_key(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "status.pending",
        PaymentStatus::Processing => "status.processing",
        PaymentStatus::Completed => "status.completed",
        PaymentStatus::Failed => "status.failed",
        PaymentStatus::Cancelled => "status.cancelled",
        PaymentStatus::Unknown => "status.unknown",
    }
}

pub fn assignment_status_key(status: AssignmentStatus) -> &'static str {
    match status {
        AssignmentStatus::Active => "fees.status.active",
        AssignmentStatus::FullyPaid => "fees.status.fully_paid",
        AssignmentStatus::Cancelled => "fees.status.cancelled",
    }
}

pub fn plan_type_key(plan_type: PlanType) -> &'static str {
    match plan_type {
        PlanType::OneTime => "plan.one_time",
        PlanType::Monthly => "plan.monthly",
        PlanType::Installment => "plan.installment",
    }
}

pub fn payment_status_badge(status: PaymentStatus, locale: &Locale) -> Span<'static> {
    Span::styled(
        locale.t(payment_status_key(status)).to_string(),
        Style::default()
            .fg(theme::payment_status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn assignment_status_badge(status: AssignmentStatus, locale: &Locale) -> Span<'static> {
    Span::styled(
        locale.t(assignment_status_key(status)).to_string(),
        Style::default().fg(theme::assignment_status_color(status)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn badges_are_translated() {
        let en = Locale::new(Language::English);
        let fr = Locale::new(Language::French);

        assert_eq!(payment_status_badge(PaymentStatus::Completed, &en).content, "Completed");
        assert_eq!(payment_status_badge(PaymentStatus::Completed, &fr).content, "Réussi");
        assert_eq!(
            assignment_status_badge(AssignmentStatus::FullyPaid, &en).content,
            "Fully paid"
        );
    }
}
