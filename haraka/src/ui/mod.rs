pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use crate::i18n::{format::format_currency, Locale};
use crate::log_buffer::LogBuffer;
use crate::state::{AppState, PaymentPhase};
use crate::state::validators::PaymentDraft;
use components::confirm_dialog::render_confirm_dialog;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher: draws the current screen, then any confirmation,
/// the help popup and finally the alert on top. Never mutates state.
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    let locale = &state.locale;

    match state.current_screen() {
        Screen::Dashboard(dashboard) => {
            dashboard_screen::render(
                f,
                dashboard,
                state.parent.as_ref(),
                state.academic_year.as_ref(),
                locale,
            );

            if let Some(ref student) = dashboard.unlink_candidate {
                render_confirm_dialog(
                    f,
                    locale,
                    locale.t("unlink.title"),
                    &locale.tf("unlink.confirm", &[("name", student.full_name().as_str())]),
                    &[],
                    true,
                );
            }
        }
        Screen::LinkStudent(link) => {
            link_student_screen::render(f, link, locale);

            if let Some(ref student) = link.found {
                let mut details = Vec::new();
                if let Some(ref school) = student.school_name {
                    details.push((locale.t("student.school").to_string(), school.clone()));
                }
                if let Some(ref grade) = student.grade_level {
                    details.push((locale.t("student.grade").to_string(), grade.clone()));
                }
                render_confirm_dialog(
                    f,
                    locale,
                    locale.t("link.title"),
                    &locale.tf("link.confirm", &[("name", student.full_name().as_str())]),
                    &details,
                    false,
                );
            }
        }
        Screen::Fees(fees) => {
            fees_screen::render(f, fees, chrono::Local::now().date_naive(), locale);
        }
        Screen::Payment(payment) => {
            payment_screen::render(f, payment, locale);

            if let PaymentPhase::Confirming(ref draft) = payment.phase {
                render_confirm_dialog(
                    f,
                    locale,
                    locale.t("payment.confirm_title"),
                    &locale.tf(
                        "payment.confirm_question",
                        &[("name", payment.student.full_name().as_str())],
                    ),
                    &draft_details(draft, locale),
                    false,
                );
            }
        }
        Screen::PaymentStatus(status) => {
            payment_status_screen::render(f, status, locale);
        }
        Screen::History(history) => {
            history_screen::render(f, history, locale);
        }
        Screen::Settings(settings) => {
            settings_screen::render(f, settings, state.parent.as_ref(), locale);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer, locale);
        }
    }

    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen(), locale);
    }

    if let Some(ref alert) = state.alert {
        components::alert::render_alert(f, alert, locale);
    }
}

/// Label/value lines summarizing a payment about to be sent.
fn draft_details(draft: &PaymentDraft, locale: &Locale) -> Vec<(String, String)> {
    let mut details = vec![
        (
            locale.t("payment.amount").to_string(),
            format_currency(draft.amount, locale),
        ),
        (
            locale.t("payment.phone").to_string(),
            draft.phone_number.clone(),
        ),
    ];
    if let Some(month) = draft.selected_month {
        details.push((
            locale.t("payment.month").to_string(),
            locale.t(month.label_key()).to_string(),
        ));
    }
    if let Some(number) = draft.installment_number {
        details.push((
            locale.t("payment.installment").to_string(),
            format!("#{}", number),
        ));
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::SchoolMonth;
    use haraka_api::endpoints::{fee_assignments::PlanType, Money};

    #[test]
    fn draft_details_list_month_for_monthly_payments() {
        let draft = PaymentDraft {
            amount: Money::from(100),
            phone_number: "243812345678".to_string(),
            payment_type: PlanType::Monthly,
            installment_number: None,
            selected_month: Some(SchoolMonth::March),
        };

        let details = draft_details(&draft, &Locale::default());
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].1, "$100.00");
        assert_eq!(details[2], ("Month".to_string(), "March".to_string()));
    }
}
