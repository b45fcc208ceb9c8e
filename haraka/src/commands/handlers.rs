use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    if event.is_interrupt() {
        return Some(AppCommand::Quit);
    }

    // Priority 0: an alert swallows everything until dismissed
    if state.alert.is_some() {
        return match key {
            Key::Enter | Key::Esc | Key::Char(' ') => Some(AppCommand::DismissAlert),
            _ => None,
        };
    }

    // Priority 1: payment form and its confirmation dialog
    if let Screen::Payment(payment_state) = state.current_screen() {
        match payment_state.phase {
            PaymentPhase::Submitting(_) => return None,
            PaymentPhase::Confirming(_) => {
                return handle_confirmation_keys(
                    key,
                    AppCommand::ConfirmPayment,
                    AppCommand::CancelPaymentConfirmation,
                );
            }
            PaymentPhase::Editing if payment_state.plan.is_some() => {
                return handle_payment_form_keys(key, payment_state);
            }
            PaymentPhase::Editing => {}
        }
    }

    // Priority 2: registration number input and link confirmation
    if let Screen::LinkStudent(link_state) = state.current_screen() {
        if link_state.found.is_some() {
            return handle_confirmation_keys(
                key,
                AppCommand::ConfirmLinkStudent,
                AppCommand::CancelLinkStudent,
            );
        }
        return match key {
            Key::Esc => Some(AppCommand::NavigateBack),
            _ if link_state.loading.is_loading() => None,
            Key::Enter => Some(AppCommand::FindStudent),
            Key::Backspace => Some(AppCommand::DeleteInputChar),
            Key::Char(c) if !c.is_control() => Some(AppCommand::AppendInputChar(c)),
            _ => None,
        };
    }

    // Priority 3: phone number edit on the settings screen
    if let Screen::Settings(settings_state) = state.current_screen() {
        if settings_state.editing_phone {
            return match key {
                Key::Enter => Some(AppCommand::SavePhone),
                Key::Esc => Some(AppCommand::CancelPhoneEdit),
                Key::Backspace => Some(AppCommand::DeleteInputChar),
                Key::Char(c) if is_phone_char(c) => Some(AppCommand::AppendInputChar(c)),
                _ => None,
            };
        }
    }

    // Priority 4: unlink confirmation on the dashboard
    if let Screen::Dashboard(dashboard_state) = state.current_screen() {
        if dashboard_state.unlink_candidate.is_some() {
            return handle_confirmation_keys(
                key,
                AppCommand::ConfirmUnlink,
                AppCommand::CancelUnlink,
            );
        }
    }

    // Priority 5: help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            ('g', Key::Char('d')) => Some(AppCommand::NavigateHome),
            ('g', Key::Char('s')) => Some(AppCommand::OpenSettings),
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),
        (_, Key::Char('q')) => Some(AppCommand::Quit),
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),
        (_, Key::Left | Key::Char('h') | Key::Esc) => Some(AppCommand::NavigateBack),

        // Dashboard
        (Screen::Dashboard(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Dashboard(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Dashboard(dashboard), Key::Enter | Key::Right | Key::Char('l')) => {
            let student = dashboard.selected_student()?;
            Some(AppCommand::OpenFees {
                student: Box::new(student.clone()),
                assignment: Box::new(dashboard.assignment_for(student.id).cloned()),
            })
        }
        (Screen::Dashboard(dashboard), Key::Char('p')) => {
            let student = dashboard.selected_student()?;
            Some(AppCommand::OpenPayment {
                student: Box::new(student.clone()),
                assignment: Box::new(dashboard.assignment_for(student.id).cloned()),
                installment_number: None,
            })
        }
        (Screen::Dashboard(dashboard), Key::Char('t')) => {
            dashboard
                .selected_student()
                .map(|student| AppCommand::LoadPaymentHistory {
                    student: Box::new(student.clone()),
                })
        }
        (Screen::Dashboard(dashboard), Key::Char('u')) => dashboard
            .selected_student()
            .map(|_| AppCommand::InitiateUnlink),
        (Screen::Dashboard(..), Key::Char('a')) => Some(AppCommand::OpenLinkStudent),
        (Screen::Dashboard(..), Key::Char('s')) => Some(AppCommand::OpenSettings),
        (Screen::Dashboard(..), Key::Char('r')) => Some(AppCommand::LoadDashboard),

        // Fees
        (Screen::Fees(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Fees(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Fees(fees), Key::Enter) => Some(AppCommand::OpenPayment {
            student: Box::new(fees.student.clone()),
            assignment: Box::new(fees.assignment.clone()),
            installment_number: fees.selected_installment().map(|i| i.installment_number),
        }),
        (Screen::Fees(fees), Key::Char('p')) => Some(AppCommand::OpenPayment {
            student: Box::new(fees.student.clone()),
            assignment: Box::new(fees.assignment.clone()),
            installment_number: None,
        }),
        (Screen::Fees(fees), Key::Char('t')) => Some(AppCommand::LoadPaymentHistory {
            student: Box::new(fees.student.clone()),
        }),

        // Payment, before a plan is available
        (Screen::Payment(payment), Key::Char('r')) => {
            matches!(payment.resolution, LoadingState::Error(_))
                .then_some(AppCommand::RetryPaymentPlan)
        }

        // Payment status
        (Screen::PaymentStatus(..), Key::Char('r')) => Some(AppCommand::RefreshPaymentStatus),
        (Screen::PaymentStatus(..), Key::Enter) => Some(AppCommand::NavigateHome),

        // History
        (Screen::History(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::History(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::History(history), Key::Char('r')) => Some(AppCommand::LoadPaymentHistory {
            student: Box::new(history.student.clone()),
        }),

        // Settings
        (Screen::Settings(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Settings(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Settings(settings), Key::Enter | Key::Char(' ')) => match settings.focus {
            SettingsField::Language => Some(AppCommand::ToggleLanguage),
            SettingsField::Phone => Some(AppCommand::EditPhone),
        },

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Home) => Some(AppCommand::ScrollLogsToTop),
        (Screen::Logs(..), Key::End) => Some(AppCommand::ScrollLogsToBottom),

        // Ignore other keys
        _ => None,
    }
}

/// Handle keyboard input while the payment form is being edited
fn handle_payment_form_keys(key: Key, payment_state: &PaymentState) -> Option<AppCommand> {
    match (payment_state.form.focus, key) {
        (_, Key::Esc) => Some(AppCommand::NavigateBack),
        (_, Key::Enter) => Some(AppCommand::SubmitPayment),
        (_, Key::Tab | Key::Down) => Some(AppCommand::NextField),
        (_, Key::BackTab | Key::Up) => Some(AppCommand::PreviousField),

        (PaymentField::Month, Key::Right | Key::Char('l')) => {
            Some(AppCommand::ShiftMonth { forward: true })
        }
        (PaymentField::Month, Key::Left | Key::Char('h')) => {
            Some(AppCommand::ShiftMonth { forward: false })
        }
        (PaymentField::Month, _) => None,

        (_, Key::Backspace) => Some(AppCommand::DeleteInputChar),
        (PaymentField::Phone, Key::Char(c)) if is_phone_char(c) => {
            Some(AppCommand::AppendInputChar(c))
        }
        (PaymentField::Amount, Key::Char(c)) if c.is_ascii_digit() || matches!(c, '.' | ',') => {
            Some(AppCommand::AppendInputChar(c))
        }
        _ => None,
    }
}

/// [Y]es / [N]o dialogs
fn handle_confirmation_keys(
    key: Key,
    confirm: AppCommand,
    cancel: AppCommand,
) -> Option<AppCommand> {
    match key {
        Key::Char('y') | Key::Char('Y') | Key::Enter => Some(confirm),
        Key::Char('n') | Key::Char('N') | Key::Esc => Some(cancel),
        _ => None,
    }
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | ' ' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::{PayablePlan, ResolvedPlan};
    use crate::state::validators::PaymentDraft;
    use chrono::NaiveDate;
    use haraka_api::endpoints::{
        fee_assignments::{AssignmentStatus, FeeAssignment, PlanType},
        students::Student,
        Money,
    };
    use uuid::Uuid;

    fn test_uuid(id: &str) -> Uuid {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        id.hash(&mut hasher);
        Uuid::from_u64_pair(hasher.finish(), 0)
    }

    fn student(id: &str) -> Student {
        Student {
            id: test_uuid(id),
            first_name: "Amani".to_string(),
            last_name: "Kabila".to_string(),
            grade_level: Some("6e".to_string()),
            school_name: Some("Lycée Wima".to_string()),
            registration_number: Some(format!("REG-{id}")),
        }
    }

    fn assignment(student_id: Uuid) -> FeeAssignment {
        FeeAssignment {
            id: test_uuid("assignment"),
            student_id,
            academic_year_id: test_uuid("year"),
            payment_plan_id: None,
            total_due: Money::from(500),
            paid_amount: Money::ZERO,
            status: AssignmentStatus::Active,
            payment_plan: None,
        }
    }

    /// Helper to create UI state on the Dashboard with two children
    fn dashboard_state() -> AppState {
        let mut state = AppState::new();
        let first = student("s1");
        let dashboard = state.dashboard_mut().unwrap();
        dashboard.assignments.insert(first.id, assignment(first.id));
        dashboard.students = vec![first, student("s2")];
        dashboard.loading = LoadingState::Loaded;
        state
    }

    fn payment_state(plan: Option<PayablePlan>) -> AppState {
        let mut state = dashboard_state();
        let mut payment = PaymentState::new(
            student("s1"),
            None,
            None,
            None,
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        payment.plan = plan.map(|payable| ResolvedPlan {
            plan_id: test_uuid("plan"),
            payable,
        });
        state.navigate_to(Screen::Payment(Box::new(payment)));
        state
    }

    fn payment_mut(state: &mut AppState) -> &mut PaymentState {
        match state.current_screen_mut() {
            Screen::Payment(payment) => payment,
            other => panic!("expected payment screen, got {other:?}"),
        }
    }

    fn draft() -> PaymentDraft {
        PaymentDraft {
            amount: Money::from(500),
            phone_number: "243812345678".to_string(),
            payment_type: PlanType::OneTime,
            installment_number: None,
            selected_month: None,
        }
    }

    fn press(state: &AppState, key: Key) -> Option<AppCommand> {
        handle_key_input(KeyEvent::new(key), state)
    }

    // ============================================================================
    // Global Commands
    // ============================================================================

    #[test]
    fn test_quit_command() {
        let state = dashboard_state();
        assert_eq!(press(&state, Key::Char('q')), Some(AppCommand::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_from_text_input() {
        let mut state = dashboard_state();
        state.navigate_to(Screen::LinkStudent(LinkStudentState::default()));

        assert_eq!(
            press(&state, Key::Char('c')),
            Some(AppCommand::AppendInputChar('c'))
        );
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('c')), &state),
            Some(AppCommand::Quit)
        );
    }

    #[test]
    fn test_help_visible_blocks_other_commands() {
        let mut state = dashboard_state();
        state.help_visible = true;

        assert_eq!(press(&state, Key::Char('j')), None);
        assert_eq!(press(&state, Key::Char('p')), None);
        assert_eq!(press(&state, Key::Char('?')), Some(AppCommand::ToggleHelp));
        assert_eq!(press(&state, Key::Esc), Some(AppCommand::ToggleHelp));
    }

    #[test]
    fn test_alert_takes_priority() {
        let mut state = dashboard_state();
        state.alert = Some(Alert::error("Payment failed", "Insufficient balance"));

        assert_eq!(press(&state, Key::Char('q')), None);
        assert_eq!(press(&state, Key::Enter), Some(AppCommand::DismissAlert));
        assert_eq!(press(&state, Key::Esc), Some(AppCommand::DismissAlert));
    }

    // ============================================================================
    // Multi-key Sequences
    // ============================================================================

    #[test]
    fn test_g_sequences() {
        let mut state = dashboard_state();
        assert_eq!(
            press(&state, Key::Char('g')),
            Some(AppCommand::SetPendingKey('g'))
        );

        state.pending_key = Some('g');
        assert_eq!(press(&state, Key::Char('g')), Some(AppCommand::NavigateToTop));
        assert_eq!(press(&state, Key::Char('s')), Some(AppCommand::OpenSettings));
        assert_eq!(press(&state, Key::Char('l')), Some(AppCommand::NavigateToLogs));
        assert_eq!(press(&state, Key::Char('d')), Some(AppCommand::NavigateHome));
        assert_eq!(press(&state, Key::Char('x')), Some(AppCommand::ClearPendingKey));
    }

    // ============================================================================
    // Dashboard
    // ============================================================================

    #[test]
    fn test_dashboard_enter_opens_fees_with_assignment() {
        let state = dashboard_state();

        match press(&state, Key::Enter) {
            Some(AppCommand::OpenFees {
                student,
                assignment,
            }) => {
                assert_eq!(student.id, test_uuid("s1"));
                assert_eq!(assignment.unwrap().student_id, test_uuid("s1"));
            }
            other => panic!("expected OpenFees, got {other:?}"),
        }
    }

    #[test]
    fn test_dashboard_pay_uses_selected_child() {
        let mut state = dashboard_state();
        state.dashboard_mut().unwrap().selected_index = 1;

        match press(&state, Key::Char('p')) {
            Some(AppCommand::OpenPayment {
                student,
                assignment,
                installment_number,
            }) => {
                assert_eq!(student.id, test_uuid("s2"));
                assert!(assignment.is_none());
                assert_eq!(installment_number, None);
            }
            other => panic!("expected OpenPayment, got {other:?}"),
        }
    }

    #[test]
    fn test_dashboard_without_children_ignores_child_actions() {
        let state = AppState::new();
        assert_eq!(press(&state, Key::Enter), None);
        assert_eq!(press(&state, Key::Char('p')), None);
        assert_eq!(press(&state, Key::Char('u')), None);
        assert_eq!(
            press(&state, Key::Char('a')),
            Some(AppCommand::OpenLinkStudent)
        );
    }

    #[test]
    fn test_unlink_confirmation_keys() {
        let mut state = dashboard_state();
        assert_eq!(
            press(&state, Key::Char('u')),
            Some(AppCommand::InitiateUnlink)
        );

        state.dashboard_mut().unwrap().unlink_candidate = Some(student("s1"));
        assert_eq!(press(&state, Key::Char('y')), Some(AppCommand::ConfirmUnlink));
        assert_eq!(press(&state, Key::Esc), Some(AppCommand::CancelUnlink));
        assert_eq!(press(&state, Key::Char('q')), None);
    }

    // ============================================================================
    // Payment
    // ============================================================================

    #[test]
    fn test_payment_form_routes_text_to_focused_field() {
        let mut state = payment_state(Some(PayablePlan::OneTime {
            total_due: Money::from(500),
        }));

        assert_eq!(
            press(&state, Key::Char('0')),
            Some(AppCommand::AppendInputChar('0'))
        );
        // Letters are not phone characters, and `q` does not quit while typing
        assert_eq!(press(&state, Key::Char('q')), None);
        assert_eq!(press(&state, Key::Enter), Some(AppCommand::SubmitPayment));
        assert_eq!(press(&state, Key::Tab), Some(AppCommand::NextField));

        payment_mut(&mut state).form.focus = PaymentField::Month;
        assert_eq!(
            press(&state, Key::Right),
            Some(AppCommand::ShiftMonth { forward: true })
        );
        assert_eq!(
            press(&state, Key::Char('h')),
            Some(AppCommand::ShiftMonth { forward: false })
        );
        assert_eq!(press(&state, Key::Backspace), None);
    }

    #[test]
    fn test_payment_confirmation_keys() {
        let mut state = payment_state(Some(PayablePlan::OneTime {
            total_due: Money::from(500),
        }));
        payment_mut(&mut state).phase = PaymentPhase::Confirming(draft());

        assert_eq!(press(&state, Key::Char('y')), Some(AppCommand::ConfirmPayment));
        assert_eq!(press(&state, Key::Enter), Some(AppCommand::ConfirmPayment));
        assert_eq!(
            press(&state, Key::Char('n')),
            Some(AppCommand::CancelPaymentConfirmation)
        );
    }

    #[test]
    fn test_submitting_ignores_input() {
        let mut state = payment_state(Some(PayablePlan::OneTime {
            total_due: Money::from(500),
        }));
        payment_mut(&mut state).phase = PaymentPhase::Submitting(draft());

        for key in [Key::Enter, Key::Char('y'), Key::Esc, Key::Char('q')] {
            assert_eq!(press(&state, key), None, "{key:?}");
        }
    }

    #[test]
    fn test_failed_resolution_can_be_retried() {
        let mut state = payment_state(None);
        assert_eq!(press(&state, Key::Char('r')), None);

        payment_mut(&mut state).resolution = LoadingState::Error("No active year".to_string());
        assert_eq!(
            press(&state, Key::Char('r')),
            Some(AppCommand::RetryPaymentPlan)
        );
        assert_eq!(press(&state, Key::Esc), Some(AppCommand::NavigateBack));
    }

    // ============================================================================
    // Link student and settings
    // ============================================================================

    #[test]
    fn test_link_student_input() {
        let mut state = dashboard_state();
        state.navigate_to(Screen::LinkStudent(LinkStudentState::default()));

        assert_eq!(
            press(&state, Key::Char('R')),
            Some(AppCommand::AppendInputChar('R'))
        );
        assert_eq!(press(&state, Key::Enter), Some(AppCommand::FindStudent));
        assert_eq!(press(&state, Key::Esc), Some(AppCommand::NavigateBack));

        if let Screen::LinkStudent(link) = state.current_screen_mut() {
            link.found = Some(student("s3"));
        }
        assert_eq!(
            press(&state, Key::Char('y')),
            Some(AppCommand::ConfirmLinkStudent)
        );
        assert_eq!(
            press(&state, Key::Char('n')),
            Some(AppCommand::CancelLinkStudent)
        );
    }

    #[test]
    fn test_settings_keys() {
        let mut state = dashboard_state();
        state.navigate_to(Screen::Settings(SettingsState::default()));

        assert_eq!(press(&state, Key::Enter), Some(AppCommand::ToggleLanguage));

        if let Screen::Settings(settings) = state.current_screen_mut() {
            settings.focus = SettingsField::Phone;
        }
        assert_eq!(press(&state, Key::Enter), Some(AppCommand::EditPhone));

        if let Screen::Settings(settings) = state.current_screen_mut() {
            settings.editing_phone = true;
        }
        assert_eq!(
            press(&state, Key::Char('8')),
            Some(AppCommand::AppendInputChar('8'))
        );
        assert_eq!(press(&state, Key::Char('x')), None);
        assert_eq!(press(&state, Key::Enter), Some(AppCommand::SavePhone));
        assert_eq!(press(&state, Key::Esc), Some(AppCommand::CancelPhoneEdit));
    }

    #[test]
    fn test_navigate_back() {
        let state = dashboard_state();
        assert_eq!(press(&state, Key::Left), Some(AppCommand::NavigateBack));
        assert_eq!(press(&state, Key::Char('h')), Some(AppCommand::NavigateBack));
    }
}
