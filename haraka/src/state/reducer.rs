use super::{Alert, AppState, LoadingState, PaymentPhase, PaymentStatusState};
use crate::events::DataEvent;
use crate::payments::ResolutionError;
use crate::ui::screens::Screen;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use uuid::Uuid;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        // Dashboard
        DataEvent::ParentLoaded { parent } => {
            state.parent = Some(parent);
        }

        DataEvent::LinkedStudentsLoaded { students } => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.selected_index = dashboard
                    .selected_index
                    .min(students.len().saturating_sub(1));
                dashboard.students = students;
            }
        }

        DataEvent::FeeSummaryLoaded {
            academic_year,
            assignments,
        } => {
            state.academic_year = academic_year;
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.assignments = assignments
                    .into_iter()
                    .map(|assignment| (assignment.student_id, assignment))
                    .collect();
                dashboard.loading = LoadingState::Loaded;
            }
        }

        DataEvent::DashboardLoadFailed { error } => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.loading = LoadingState::Error(error);
            }
        }

        // Fee-plan resolution. Results for a screen that is gone are dropped.
        DataEvent::PaymentPlanLoaded {
            student_id,
            assignment,
        } => {
            let locale = state.locale.clone();
            if let Screen::Payment(payment) = state.current_screen_mut() {
                if payment.student.id == student_id && payment.resolution.is_loading() {
                    payment.apply_assignment(assignment, &locale);
                }
            }
        }

        DataEvent::PaymentPlanFailed { student_id, error } => {
            let message = resolution_message(state, &error);
            if let Screen::Payment(payment) = state.current_screen_mut() {
                if payment.student.id == student_id {
                    payment.plan = None;
                    payment.resolution = LoadingState::Error(message);
                }
            }
        }

        // Payment initiation
        DataEvent::PaymentInitiated { payment } => {
            let loading = if payment.payment_id.is_some() {
                LoadingState::loading()
            } else {
                LoadingState::Loaded
            };

            let submitted = match state.current_screen_mut() {
                Screen::Payment(screen) if screen.is_submitting() => {
                    match std::mem::take(&mut screen.phase) {
                        PaymentPhase::Submitting(draft) => Some((screen.student.clone(), draft)),
                        _ => None,
                    }
                }
                _ => None,
            };

            match submitted {
                Some((student, draft)) => {
                    tracing::info!(
                        "Payment accepted, transaction {}",
                        payment.transaction_id
                    );
                    // The form is done; back from the status screen skips it
                    state.history.pop();
                    state.navigate_to(Screen::PaymentStatus(PaymentStatusState {
                        student,
                        draft,
                        initiated: payment,
                        payment: None,
                        loading,
                    }));
                }
                None => {
                    tracing::warn!(
                        "Payment {} accepted after its screen was closed",
                        payment.transaction_id
                    );
                    state.alert = Some(Alert::success(
                        state.locale.t("status.title"),
                        state.locale.tf(
                            "status.accepted",
                            &[("transaction", payment.transaction_id.as_str())],
                        ),
                    ));
                }
            }
        }

        DataEvent::PaymentFailed { error } => {
            if let Screen::Payment(payment) = state.current_screen_mut() {
                if payment.is_submitting() {
                    payment.phase = PaymentPhase::Editing;
                }
            }
            state.alert = Some(Alert::error(state.locale.t("payment.failed_title"), error));
        }

        DataEvent::PaymentStatusLoaded { payment } => {
            if let Screen::PaymentStatus(status) = state.current_screen_mut() {
                if is_same_payment(status.initiated.payment_id.as_deref(), payment.id) {
                    status.payment = Some(payment);
                    status.loading = LoadingState::Loaded;
                }
            }
        }

        DataEvent::PaymentStatusFailed { error } => {
            if let Screen::PaymentStatus(status) = state.current_screen_mut() {
                status.loading = LoadingState::Error(error);
            }
        }

        // History
        DataEvent::PaymentHistoryLoaded {
            student_id,
            payments,
        } => {
            if let Screen::History(history) = state.current_screen_mut() {
                if history.student.id == student_id {
                    let selected = (!payments.is_empty()).then_some(0);
                    history.payments = payments;
                    history.loading = LoadingState::Loaded;
                    history.table_state =
                        RefCell::new(TableState::default().with_selected(selected));
                }
            }
        }

        DataEvent::PaymentHistoryFailed { student_id, error } => {
            if let Screen::History(history) = state.current_screen_mut() {
                if history.student.id == student_id {
                    history.loading = LoadingState::Error(error);
                }
            }
        }

        // Student linking
        DataEvent::StudentFound { student } => {
            if let Screen::LinkStudent(link) = state.current_screen_mut() {
                link.found = Some(student);
                link.loading = LoadingState::Loaded;
            }
        }

        DataEvent::StudentNotFound {
            registration_number,
        } => {
            let message = state
                .locale
                .tf("link.not_found", &[("number", registration_number.as_str())]);
            if let Screen::LinkStudent(link) = state.current_screen_mut() {
                link.loading = LoadingState::Error(message);
            }
        }

        DataEvent::StudentLinked { student } => {
            if matches!(state.current_screen(), Screen::LinkStudent(_)) {
                state.navigate_back();
            }
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.loading = LoadingState::loading();
            }
            state.alert = Some(Alert::success(
                state.locale.t("link.title"),
                state
                    .locale
                    .tf("link.success", &[("name", student.full_name().as_str())]),
            ));
        }

        DataEvent::StudentUnlinked { student_id } => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.students.retain(|s| s.id != student_id);
                dashboard.assignments.remove(&student_id);
                dashboard.selected_index = dashboard
                    .selected_index
                    .min(dashboard.students.len().saturating_sub(1));
            }
        }

        DataEvent::LinkFailed { error } => {
            if let Screen::LinkStudent(link) = state.current_screen_mut() {
                link.loading = LoadingState::Error(error.clone());
            }
            if let Some(dashboard) = state.dashboard_mut() {
                if dashboard.loading.is_loading() {
                    dashboard.loading = LoadingState::Loaded;
                }
            }
            state.alert = Some(Alert::error(state.locale.t("link.title"), error));
        }

        // Settings
        DataEvent::ParentUpdated { parent } => {
            state.parent = Some(parent);
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.saving = LoadingState::Loaded;
                settings.phone_input.clear();
            }
            state.alert = Some(Alert::success(
                state.locale.t("settings.title"),
                state.locale.t("settings.saved"),
            ));
        }

        DataEvent::ParentUpdateFailed { error } => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.saving = LoadingState::Error(error.clone());
            }
            state.alert = Some(Alert::error(state.locale.t("settings.title"), error));
        }

        // Errors
        DataEvent::LoadError { error } => {
            tracing::error!("Load error: {}", error);
            state.alert = Some(Alert::error(state.locale.t("error.title"), error));
        }
    }
}

/// Ids come back from the payments API as text, in any case.
fn is_same_payment(initiated_id: Option<&str>, id: Uuid) -> bool {
    initiated_id.and_then(|raw| Uuid::parse_str(raw.trim()).ok()) == Some(id)
}

fn resolution_message(state: &AppState, error: &ResolutionError) -> String {
    match error {
        ResolutionError::Remote(message) => state
            .locale
            .tf(error.message_key(), &[("message", message.as_str())]),
        _ => state.locale.t(error.message_key()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, Locale};
    use crate::state::{
        validators::PaymentDraft, AlertKind, HistoryState, LinkStudentState, PaymentState,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use haraka_api::endpoints::{
        academic_years::AcademicYear,
        fee_assignments::{AssignmentStatus, FeeAssignment, PaymentPlan, PlanKind, PlanType},
        parents::Parent,
        payments::{InitiatedPayment, Payment, PaymentStatus},
        students::Student,
        Money,
    };
    use uuid::Uuid;

    // ============================================================================
    // Helper Functions
    // ============================================================================

    /// Generate a deterministic UUID from a string ID for testing
    fn test_uuid(id: &str) -> Uuid {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        id.hash(&mut hasher);
        Uuid::from_u64_pair(hasher.finish(), 2)
    }

    fn create_test_student(id: &str, first_name: &str) -> Student {
        Student {
            id: test_uuid(id),
            first_name: first_name.to_string(),
            last_name: "Ilunga".to_string(),
            grade_level: Some("4e".to_string()),
            school_name: Some("Complexe Scolaire Maman Yemo".to_string()),
            registration_number: Some(format!("REG-{}", id)),
        }
    }

    fn create_test_assignment(student_id: &str, total_due: i64, paid: i64) -> FeeAssignment {
        FeeAssignment {
            id: test_uuid(&format!("assignment-{}", student_id)),
            student_id: test_uuid(student_id),
            academic_year_id: test_uuid("year"),
            payment_plan_id: Some(test_uuid("plan")),
            total_due: Money::from(total_due),
            paid_amount: Money::from(paid),
            status: AssignmentStatus::Active,
            payment_plan: Some(PaymentPlan {
                id: test_uuid("plan"),
                discount_percentage: Some(5.0),
                kind: PlanKind::OneTime,
            }),
        }
    }

    fn create_test_draft() -> PaymentDraft {
        PaymentDraft {
            amount: Money::from(250),
            phone_number: "243812345678".to_string(),
            payment_type: PlanType::OneTime,
            installment_number: None,
            selected_month: None,
        }
    }

    fn payment_screen_state(phase: PaymentPhase) -> AppState {
        let mut state = AppState::new();
        let mut payment = PaymentState::new(
            create_test_student("s1", "Amani"),
            None,
            None,
            None,
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        payment.resolution = LoadingState::loading();
        payment.phase = phase;
        state.navigate_to(Screen::Payment(Box::new(payment)));
        state
    }

    // ============================================================================
    // Dashboard
    // ============================================================================

    #[test]
    fn test_dashboard_loads_in_order() {
        let mut state = AppState::new();
        state.dashboard_mut().unwrap().loading = LoadingState::loading();

        reduce_data_event(
            &mut state,
            DataEvent::ParentLoaded {
                parent: Parent {
                    id: test_uuid("parent"),
                    user_id: test_uuid("user"),
                    first_name: "Grace".to_string(),
                    last_name: "Mbuyi".to_string(),
                    phone: None,
                    email: None,
                    is_active: true,
                },
            },
        );
        reduce_data_event(
            &mut state,
            DataEvent::LinkedStudentsLoaded {
                students: vec![
                    create_test_student("s1", "Amani"),
                    create_test_student("s2", "Bisimwa"),
                ],
            },
        );
        // Still loading until the fee summary arrives
        assert!(state.dashboard().unwrap().loading.is_loading());

        reduce_data_event(
            &mut state,
            DataEvent::FeeSummaryLoaded {
                academic_year: Some(AcademicYear {
                    id: test_uuid("year"),
                    name: Some("2026-2027".to_string()),
                    is_active: true,
                    start_date: None,
                    end_date: None,
                }),
                assignments: vec![
                    create_test_assignment("s1", 500, 200),
                    create_test_assignment("s2", 300, 300),
                ],
            },
        );

        let dashboard = state.dashboard().unwrap();
        assert_eq!(dashboard.loading, LoadingState::Loaded);
        assert_eq!(dashboard.students.len(), 2);
        assert_eq!(
            dashboard
                .assignment_for(test_uuid("s1"))
                .unwrap()
                .balance()
                .to_fixed(),
            "300.00"
        );
        assert_eq!(dashboard.total_balance().to_fixed(), "300.00");
        assert_eq!(state.parent.as_ref().unwrap().first_name, "Grace");
        assert!(state.academic_year.is_some());
    }

    #[test]
    fn test_dashboard_failure_sets_error() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::DashboardLoadFailed {
                error: "Network error".to_string(),
            },
        );
        assert_eq!(
            state.dashboard().unwrap().loading,
            LoadingState::Error("Network error".to_string())
        );
    }

    #[test]
    fn test_selection_clamped_when_children_shrink() {
        let mut state = AppState::new();
        {
            let dashboard = state.dashboard_mut().unwrap();
            dashboard.students = vec![
                create_test_student("s1", "Amani"),
                create_test_student("s2", "Bisimwa"),
            ];
            dashboard.selected_index = 1;
        }

        reduce_data_event(
            &mut state,
            DataEvent::StudentUnlinked {
                student_id: test_uuid("s2"),
            },
        );
        let dashboard = state.dashboard().unwrap();
        assert_eq!(dashboard.students.len(), 1);
        assert_eq!(dashboard.selected_index, 0);
    }

    // ============================================================================
    // Payment
    // ============================================================================

    #[test]
    fn test_plan_loaded_resolves_payment_screen() {
        let mut state = payment_screen_state(PaymentPhase::Editing);

        reduce_data_event(
            &mut state,
            DataEvent::PaymentPlanLoaded {
                student_id: test_uuid("s1"),
                assignment: create_test_assignment("s1", 500, 0),
            },
        );

        match state.current_screen() {
            Screen::Payment(payment) => {
                assert_eq!(payment.resolution, LoadingState::Loaded);
                assert_eq!(payment.form.amount, "500.00");
                assert!(payment.plan.is_some());
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_plan_for_other_student_is_ignored() {
        let mut state = payment_screen_state(PaymentPhase::Editing);

        reduce_data_event(
            &mut state,
            DataEvent::PaymentPlanLoaded {
                student_id: test_uuid("s2"),
                assignment: create_test_assignment("s2", 500, 0),
            },
        );

        match state.current_screen() {
            Screen::Payment(payment) => assert!(payment.resolution.is_loading()),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_plan_failure_is_localized() {
        let mut state = payment_screen_state(PaymentPhase::Editing);
        state.locale = Locale::new(Language::French);

        reduce_data_event(
            &mut state,
            DataEvent::PaymentPlanFailed {
                student_id: test_uuid("s1"),
                error: ResolutionError::NoActiveYear,
            },
        );

        let expected = state.locale.t("payment.error.no_active_year").to_string();
        match state.current_screen() {
            Screen::Payment(payment) => {
                assert_eq!(payment.resolution, LoadingState::Error(expected))
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_initiated_payment_replaces_form_with_status() {
        let mut state = payment_screen_state(PaymentPhase::Submitting(create_test_draft()));
        let depth = state.history.len();

        reduce_data_event(
            &mut state,
            DataEvent::PaymentInitiated {
                payment: InitiatedPayment {
                    payment_id: Some(test_uuid("payment").to_string()),
                    transaction_id: "TXN-42".to_string(),
                },
            },
        );

        assert_eq!(state.history.len(), depth);
        match state.current_screen() {
            Screen::PaymentStatus(status) => {
                assert_eq!(status.initiated.transaction_id, "TXN-42");
                assert_eq!(status.draft, create_test_draft());
                assert!(status.loading.is_loading());
            }
            other => panic!("unexpected screen {other:?}"),
        }

        reduce_data_event(
            &mut state,
            DataEvent::PaymentStatusLoaded {
                payment: Payment {
                    id: test_uuid("payment"),
                    student_id: test_uuid("s1"),
                    amount: Money::from(250),
                    status: PaymentStatus::Pending,
                    transaction_id: Some("TXN-42".to_string()),
                    payment_method: Some("mobile_money".to_string()),
                    phone_number: Some("243812345678".to_string()),
                    installment_number: None,
                    created_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
                },
            },
        );
        match state.current_screen() {
            Screen::PaymentStatus(status) => {
                assert_eq!(status.loading, LoadingState::Loaded);
                assert_eq!(
                    status.payment.as_ref().unwrap().status,
                    PaymentStatus::Pending
                );
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_status_matches_upper_case_payment_id() {
        let mut state = payment_screen_state(PaymentPhase::Submitting(create_test_draft()));
        let id = test_uuid("payment");

        reduce_data_event(
            &mut state,
            DataEvent::PaymentInitiated {
                payment: InitiatedPayment {
                    payment_id: Some(id.to_string().to_uppercase()),
                    transaction_id: "TXN-43".to_string(),
                },
            },
        );
        reduce_data_event(
            &mut state,
            DataEvent::PaymentStatusLoaded {
                payment: Payment {
                    id,
                    student_id: test_uuid("s1"),
                    amount: Money::from(250),
                    status: PaymentStatus::Completed,
                    transaction_id: Some("TXN-43".to_string()),
                    payment_method: None,
                    phone_number: None,
                    installment_number: None,
                    created_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
                },
            },
        );

        match state.current_screen() {
            Screen::PaymentStatus(status) => {
                assert_eq!(status.loading, LoadingState::Loaded);
                assert!(status.payment.is_some());
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_status_for_other_payment_is_ignored() {
        assert!(!is_same_payment(None, test_uuid("payment")));
        assert!(!is_same_payment(Some("not-a-uuid"), test_uuid("payment")));
        assert!(!is_same_payment(
            Some(&test_uuid("other").to_string()),
            test_uuid("payment")
        ));
    }

    #[test]
    fn test_payment_failure_returns_to_form_with_alert() {
        let mut state = payment_screen_state(PaymentPhase::Submitting(create_test_draft()));

        reduce_data_event(
            &mut state,
            DataEvent::PaymentFailed {
                error: "Insufficient balance".to_string(),
            },
        );

        match state.current_screen() {
            Screen::Payment(payment) => assert_eq!(payment.phase, PaymentPhase::Editing),
            other => panic!("unexpected screen {other:?}"),
        }
        let alert = state.alert.as_ref().unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.message, "Insufficient balance");
    }

    // ============================================================================
    // History and linking
    // ============================================================================

    #[test]
    fn test_history_loaded_selects_first_row() {
        let mut state = AppState::new();
        let student = create_test_student("s1", "Amani");
        state.navigate_to(Screen::History(HistoryState::new(student)));

        reduce_data_event(
            &mut state,
            DataEvent::PaymentHistoryLoaded {
                student_id: test_uuid("s1"),
                payments: vec![],
            },
        );

        match state.current_screen() {
            Screen::History(history) => {
                assert_eq!(history.loading, LoadingState::Loaded);
                assert_eq!(history.table_state.borrow().selected(), None);
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_student_not_found_mentions_number() {
        let mut state = AppState::new();
        state.navigate_to(Screen::LinkStudent(LinkStudentState {
            input: "REG-404".to_string(),
            loading: LoadingState::loading(),
            found: None,
        }));

        reduce_data_event(
            &mut state,
            DataEvent::StudentNotFound {
                registration_number: "REG-404".to_string(),
            },
        );

        match state.current_screen() {
            Screen::LinkStudent(link) => match &link.loading {
                LoadingState::Error(message) => assert!(message.contains("REG-404")),
                other => panic!("unexpected loading state {other:?}"),
            },
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn test_student_linked_returns_to_dashboard() {
        let mut state = AppState::new();
        state.navigate_to(Screen::LinkStudent(LinkStudentState::default()));

        reduce_data_event(
            &mut state,
            DataEvent::StudentLinked {
                student: create_test_student("s3", "Chance"),
            },
        );

        assert!(matches!(state.current_screen(), Screen::Dashboard(_)));
        assert!(state.dashboard().unwrap().loading.is_loading());
        assert_eq!(state.alert.as_ref().unwrap().kind, AlertKind::Success);
    }
}
