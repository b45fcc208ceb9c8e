use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::i18n::{format::format_amount_input, Language, Locale};
use crate::payments::{plan::SCHOOL_MONTHS, PayablePlan};
use crate::state::validators;
use crate::state::*;
use crate::ui::screens::Screen;
use haraka_api::endpoints::{payments::InitiatePayment, students::Student};
use uuid::Uuid;

const LOG_PAGE_SIZE: usize = 20;

/// Background work left behind by a command once its state change is applied.
#[derive(Debug)]
enum Task {
    LoadDashboard,
    ResolvePaymentPlan { student_id: Uuid },
    InitiatePayment { request: Box<InitiatePayment> },
    LoadPayment { payment_id: String },
    LoadPaymentHistory { student_id: Uuid },
    FindStudent { registration_number: String },
    LinkStudent { parent_id: Uuid, student: Box<Student> },
    UnlinkStudent { parent_id: Uuid, student_id: Uuid },
    UpdatePhone { parent_id: Uuid, phone: String },
    SaveLanguage(Language),
}

/// Execute a command by spawning background tasks or sending app events
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let Some(task) = apply_command(command, state) else {
        return;
    };

    let data_loader = data_loader.clone();
    match task {
        Task::LoadDashboard => {
            task_manager.spawn_load_task("load_dashboard".to_string(), async move {
                data_loader.load_dashboard().await;
            });
        }
        Task::ResolvePaymentPlan { student_id } => {
            task_manager.spawn_load_task(format!("resolve_plan_{}", student_id), async move {
                data_loader.resolve_payment_plan(student_id).await;
            });
        }
        Task::InitiatePayment { request } => {
            task_manager.spawn_load_task("initiate_payment".to_string(), async move {
                data_loader.initiate_payment(*request).await;
            });
        }
        Task::LoadPayment { payment_id } => {
            task_manager.spawn_load_task(format!("load_payment_{}", payment_id), async move {
                data_loader.load_payment(payment_id).await;
            });
        }
        Task::LoadPaymentHistory { student_id } => {
            task_manager.spawn_load_task(format!("load_history_{}", student_id), async move {
                data_loader.load_payment_history(student_id).await;
            });
        }
        Task::FindStudent {
            registration_number,
        } => {
            task_manager.spawn_load_task("find_student".to_string(), async move {
                data_loader.find_student(registration_number).await;
            });
        }
        Task::LinkStudent { parent_id, student } => {
            task_manager.spawn_load_task(format!("link_student_{}", student.id), async move {
                data_loader.link_student(parent_id, *student).await;
            });
        }
        Task::UnlinkStudent {
            parent_id,
            student_id,
        } => {
            task_manager.spawn_load_task(format!("unlink_student_{}", student_id), async move {
                data_loader.unlink_student(parent_id, student_id).await;
            });
        }
        Task::UpdatePhone { parent_id, phone } => {
            task_manager.spawn_load_task("update_phone".to_string(), async move {
                data_loader.update_phone(parent_id, phone).await;
            });
        }
        Task::SaveLanguage(language) => {
            // Numbered here, on the UI thread, so writes keep the toggle order
            let revision = data_loader.preferences.next_revision();
            task_manager.spawn_load_task(format!("save_language_{}", revision), async move {
                data_loader.save_language(language, revision).await;
            });
        }
    }
}

/// Synchronous command execution for testing (no background tasks)
///
/// Applies exactly the state change `execute_command` would, then drops the
/// background work. Tests inject the matching `DataEvent`s instead.
///
/// NOTE: This is public for use by the testing module but should not be used in production code.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    if let Some(task) = apply_command(command, state) {
        tracing::debug!("Skipping background task in sync mode: {:?}", task);
    }
}

fn apply_command(command: AppCommand, state: &mut AppState) -> Option<Task> {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let task = match command {
        // Simple state updates
        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
            None
        }
        AppCommand::DismissAlert => {
            state.alert = None;
            None
        }
        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
            None
        }
        AppCommand::ClearPendingKey => {
            state.pending_key = None;
            None
        }

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
            None
        }
        AppCommand::NavigateHome => {
            if state.history.len() > 1 {
                state.navigate_home();
                reload_dashboard(state)
            } else {
                None
            }
        }
        AppCommand::NavigateToTop => {
            match state.current_screen_mut() {
                Screen::Dashboard(s) => s.selected_index = 0,
                Screen::Fees(s) => s.table_state.borrow_mut().select(Some(0)),
                Screen::History(s) => s.table_state.borrow_mut().select(Some(0)),
                Screen::Settings(s) => s.focus = SettingsField::Language,
                Screen::Logs(s) => s.scroll_offset = s.total_entries.saturating_sub(1),
                _ => {}
            }
            None
        }
        AppCommand::NavigateToBottom => {
            match state.current_screen_mut() {
                Screen::Dashboard(s) => s.selected_index = s.students.len().saturating_sub(1),
                Screen::Fees(s) => {
                    let len = s.installments().len();
                    if len > 0 {
                        s.table_state.borrow_mut().select(Some(len - 1));
                    }
                }
                Screen::History(s) => {
                    let len = s.payments.len();
                    if len > 0 {
                        s.table_state.borrow_mut().select(Some(len - 1));
                    }
                }
                Screen::Settings(s) => s.focus = SettingsField::Phone,
                Screen::Logs(s) => s.scroll_offset = 0,
                _ => {}
            }
            None
        }
        AppCommand::SelectNext => {
            match state.current_screen_mut() {
                Screen::Dashboard(s) => s.select_next(),
                Screen::Fees(s) => s.select_next(),
                Screen::History(s) => s.select_next(),
                Screen::Settings(s) => s.focus = toggle_settings_focus(s.focus),
                _ => {}
            }
            None
        }
        AppCommand::SelectPrevious => {
            match state.current_screen_mut() {
                Screen::Dashboard(s) => s.select_prev(),
                Screen::Fees(s) => s.select_prev(),
                Screen::History(s) => s.select_prev(),
                Screen::Settings(s) => s.focus = toggle_settings_focus(s.focus),
                _ => {}
            }
            None
        }

        // Dashboard
        AppCommand::LoadDashboard => reload_dashboard(state),
        AppCommand::OpenFees {
            student,
            assignment,
        } => {
            tracing::info!("Opening fees for student {}", student.id);
            state.navigate_to(Screen::Fees(FeesState::new(*student, *assignment)));
            None
        }
        AppCommand::LoadPaymentHistory { student } => {
            let student_id = student.id;
            match state.current_screen_mut() {
                Screen::History(history) if history.student.id == student_id => {
                    tracing::debug!("Refreshing payment history");
                    history.loading = LoadingState::loading();
                }
                _ => {
                    tracing::info!("Opening payment history for student {}", student_id);
                    state.navigate_to(Screen::History(HistoryState::new(*student)));
                }
            }
            Some(Task::LoadPaymentHistory { student_id })
        }

        // Payment
        AppCommand::OpenPayment {
            student,
            assignment,
            installment_number,
        } => {
            let student_id = student.id;
            let phone = state.parent.as_ref().and_then(|p| p.phone.clone());
            let mut payment =
                PaymentState::new(*student, None, installment_number, phone, today());

            let task = match *assignment {
                Some(assignment) if assignment.payment_plan.is_some() => {
                    tracing::debug!("Resolving plan from the assignment already loaded");
                    payment.apply_assignment(assignment, &state.locale);
                    None
                }
                _ => {
                    payment.resolution = LoadingState::loading();
                    Some(Task::ResolvePaymentPlan { student_id })
                }
            };

            tracing::info!("Opening payment for student {}", student_id);
            state.navigate_to(Screen::Payment(Box::new(payment)));
            task
        }
        AppCommand::RetryPaymentPlan => match state.current_screen_mut() {
            Screen::Payment(payment) if !payment.resolution.is_loading() => {
                payment.plan = None;
                payment.resolution = LoadingState::loading();
                Some(Task::ResolvePaymentPlan {
                    student_id: payment.student.id,
                })
            }
            _ => None,
        },
        AppCommand::SubmitPayment => {
            let mut rejection = None;
            if let Screen::Payment(payment) = state.current_screen_mut() {
                if payment.phase == PaymentPhase::Editing {
                    if let Some(ref resolved) = payment.plan {
                        match validators::validate_payment_form(&resolved.payable, &payment.form)
                        {
                            Ok(draft) => {
                                tracing::debug!("Payment form valid, asking for confirmation");
                                payment.phase = PaymentPhase::Confirming(draft);
                            }
                            Err(e) => rejection = Some(e),
                        }
                    }
                }
            }

            if let Some(error) = rejection {
                tracing::info!("Payment form rejected: {:?}", error);
                state.alert = Some(Alert::error(
                    state.locale.t("payment.invalid_title"),
                    state.locale.t(error.message_key()),
                ));
            }
            None
        }
        AppCommand::ConfirmPayment => match state.current_screen_mut() {
            Screen::Payment(payment) => match (&payment.phase, &payment.plan) {
                (PaymentPhase::Confirming(draft), Some(resolved)) => {
                    let draft = draft.clone();
                    let request = draft.to_request(payment.student.id, resolved.plan_id);
                    tracing::info!(
                        "Submitting {} payment of {} for student {}",
                        draft.payment_type.as_str(),
                        draft.amount,
                        payment.student.id
                    );
                    payment.phase = PaymentPhase::Submitting(draft);
                    Some(Task::InitiatePayment {
                        request: Box::new(request),
                    })
                }
                (PaymentPhase::Submitting(_), _) => {
                    tracing::warn!("Payment already in flight, ignoring confirmation");
                    None
                }
                _ => None,
            },
            _ => None,
        },
        AppCommand::CancelPaymentConfirmation => {
            if let Screen::Payment(payment) = state.current_screen_mut() {
                if matches!(payment.phase, PaymentPhase::Confirming(_)) {
                    payment.phase = PaymentPhase::Editing;
                }
            }
            None
        }
        AppCommand::RefreshPaymentStatus => match state.current_screen_mut() {
            Screen::PaymentStatus(status) => {
                status.initiated.payment_id.clone().map(|payment_id| {
                    status.loading = LoadingState::loading();
                    Task::LoadPayment { payment_id }
                })
            }
            _ => None,
        },

        // Text input
        AppCommand::AppendInputChar(c) => {
            if let Some(input) = focused_input(state) {
                input.push(c);
            }
            None
        }
        AppCommand::DeleteInputChar => {
            if let Some(input) = focused_input(state) {
                input.pop();
            }
            None
        }
        AppCommand::NextField => {
            if let Screen::Payment(payment) = state.current_screen_mut() {
                payment.focus_next(true);
            }
            None
        }
        AppCommand::PreviousField => {
            if let Screen::Payment(payment) = state.current_screen_mut() {
                payment.focus_next(false);
            }
            None
        }
        AppCommand::ShiftMonth { forward } => {
            if let Screen::Payment(payment) = state.current_screen_mut() {
                if let Some(PayablePlan::Monthly { selected_month, .. }) =
                    payment.plan.as_mut().map(|p| &mut p.payable)
                {
                    let month = match *selected_month {
                        Some(month) => month.shifted(forward),
                        None if forward => SCHOOL_MONTHS[0],
                        None => SCHOOL_MONTHS[SCHOOL_MONTHS.len() - 1],
                    };
                    *selected_month = Some(month);
                }
                if let Some(amount) = payment.plan.as_ref().and_then(|p| p.payable.amount()) {
                    payment.form.amount = format_amount_input(amount);
                }
            }
            None
        }

        // Student linking
        AppCommand::OpenLinkStudent => {
            state.navigate_to(Screen::LinkStudent(LinkStudentState::default()));
            None
        }
        AppCommand::FindStudent => {
            let mut task = None;
            if let Screen::LinkStudent(link) = state.current_screen_mut() {
                if let Some(registration_number) =
                    validators::validate_registration_number(&link.input)
                {
                    link.loading = LoadingState::loading();
                    task = Some(Task::FindStudent {
                        registration_number,
                    });
                }
            }
            if task.is_none() {
                state.alert = Some(Alert::error(
                    state.locale.t("link.title"),
                    state.locale.t("validation.registration_required"),
                ));
            }
            task
        }
        AppCommand::ConfirmLinkStudent => {
            let Some(parent_id) = state.parent.as_ref().map(|p| p.id) else {
                state.alert = Some(Alert::error(
                    state.locale.t("link.title"),
                    state.locale.t("error.no_parent"),
                ));
                return finish(state, is_setting_pending_key, None);
            };
            match state.current_screen_mut() {
                Screen::LinkStudent(link) => link.found.take().map(|student| {
                    link.loading = LoadingState::loading();
                    Task::LinkStudent {
                        parent_id,
                        student: Box::new(student),
                    }
                }),
                _ => None,
            }
        }
        AppCommand::CancelLinkStudent => {
            if let Screen::LinkStudent(link) = state.current_screen_mut() {
                link.found = None;
            }
            None
        }
        AppCommand::InitiateUnlink => {
            if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                dashboard.unlink_candidate = dashboard.selected_student().cloned();
            }
            None
        }
        AppCommand::ConfirmUnlink => {
            let parent_id = state.parent.as_ref().map(|p| p.id);
            match (parent_id, state.current_screen_mut()) {
                (Some(parent_id), Screen::Dashboard(dashboard)) => {
                    dashboard.unlink_candidate.take().map(|student| {
                        tracing::info!("Unlinking student {}", student.id);
                        dashboard.loading = LoadingState::loading();
                        Task::UnlinkStudent {
                            parent_id,
                            student_id: student.id,
                        }
                    })
                }
                (None, Screen::Dashboard(dashboard)) => {
                    dashboard.unlink_candidate = None;
                    None
                }
                _ => None,
            }
        }
        AppCommand::CancelUnlink => {
            if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                dashboard.unlink_candidate = None;
            }
            None
        }

        // Settings
        AppCommand::OpenSettings => {
            if !matches!(state.current_screen(), Screen::Settings(_)) {
                state.navigate_to(Screen::Settings(SettingsState::default()));
            }
            None
        }
        AppCommand::ToggleLanguage => {
            let language = state.locale.language().toggled();
            tracing::info!("Switching language to {}", language.code());
            state.locale = Locale::new(language);
            Some(Task::SaveLanguage(language))
        }
        AppCommand::EditPhone => {
            let phone = state
                .parent
                .as_ref()
                .and_then(|p| p.phone.clone())
                .unwrap_or_default();
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.phone_input = phone;
                settings.editing_phone = true;
            }
            None
        }
        AppCommand::SavePhone => {
            let parent_id = state.parent.as_ref().map(|p| p.id);
            let mut rejected = None;
            let mut task = None;
            if let Screen::Settings(settings) = state.current_screen_mut() {
                match (parent_id, validators::validate_phone(&settings.phone_input)) {
                    (Some(parent_id), Ok(phone)) => {
                        settings.editing_phone = false;
                        settings.saving = LoadingState::loading();
                        task = Some(Task::UpdatePhone { parent_id, phone });
                    }
                    (None, _) => rejected = Some("error.no_parent"),
                    (_, Err(e)) => rejected = Some(e.message_key()),
                }
            }
            if let Some(key) = rejected {
                state.alert = Some(Alert::error(
                    state.locale.t("settings.phone"),
                    state.locale.t(key),
                ));
            }
            task
        }
        AppCommand::CancelPhoneEdit => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.editing_phone = false;
                settings.phone_input.clear();
            }
            None
        }

        // Logs
        AppCommand::NavigateToLogs => {
            // No logging here, it would land on the screen being opened
            if !matches!(state.current_screen(), Screen::Logs(_)) {
                state.navigate_to(Screen::Logs(LogsState::default()));
            }
            None
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
            None
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset =
                    (s.scroll_offset + LOG_PAGE_SIZE).min(s.total_entries.saturating_sub(1));
            }
            None
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
            None
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
            None
        }
    };

    finish(state, is_setting_pending_key, task)
}

/// Clear pending key after any command except SetPendingKey
fn finish(state: &mut AppState, is_setting_pending_key: bool, task: Option<Task>) -> Option<Task> {
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
    task
}

fn reload_dashboard(state: &mut AppState) -> Option<Task> {
    let dashboard = state.dashboard_mut()?;
    if dashboard.loading.is_loading() {
        tracing::debug!("Dashboard already loading");
        return None;
    }
    dashboard.loading = LoadingState::loading();
    Some(Task::LoadDashboard)
}

/// The text field that currently receives typed characters, if any.
fn focused_input(state: &mut AppState) -> Option<&mut String> {
    match state.current_screen_mut() {
        Screen::Payment(payment) if payment.phase == PaymentPhase::Editing => {
            let editable = payment
                .plan
                .as_ref()
                .is_some_and(|p| p.payable.amount_editable());
            match payment.form.focus {
                PaymentField::Phone => Some(&mut payment.form.phone),
                PaymentField::Amount if editable => Some(&mut payment.form.amount),
                _ => None,
            }
        }
        Screen::LinkStudent(link) if link.found.is_none() && !link.loading.is_loading() => {
            Some(&mut link.input)
        }
        Screen::Settings(settings) if settings.editing_phone => Some(&mut settings.phone_input),
        _ => None,
    }
}

fn toggle_settings_focus(focus: SettingsField) -> SettingsField {
    match focus {
        SettingsField::Language => SettingsField::Phone,
        SettingsField::Phone => SettingsField::Language,
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
