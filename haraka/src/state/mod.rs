pub mod reducer;
pub mod validators;

use crate::i18n::Locale;
use crate::payments::plan::{self, ResolvedPlan};
use crate::ui::screens::Screen;
use chrono::NaiveDate;
use haraka_api::endpoints::{
    academic_years::AcademicYear,
    fee_assignments::{FeeAssignment, Installment},
    parents::Parent,
    payments::{InitiatedPayment, Payment},
    students::Student,
    Money,
};
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::collections::HashMap;
use throbber_widgets_tui::ThrobberState;
use uuid::Uuid;
use validators::PaymentDraft;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        Self::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A dismissible message shown on top of the current screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,
    pub locale: Locale,

    // Loaded once per session, shared across screens
    pub parent: Option<Parent>,
    pub academic_year: Option<AcademicYear>,

    // UI state
    pub alert: Option<Alert>,
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_locale(Locale::default())
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            history: vec![Screen::Dashboard(DashboardState::default())],
            locale,

            parent: None,
            academic_year: None,

            alert: None,
            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Drop every screen above the dashboard.
    pub fn navigate_home(&mut self) {
        tracing::debug!("Navigating home from stack depth {}", self.history.len());
        self.history.truncate(1);
    }

    /// The dashboard is always the root of the stack.
    pub fn dashboard(&self) -> Option<&DashboardState> {
        match self.history.first() {
            Some(Screen::Dashboard(state)) => Some(state),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardState> {
        match self.history.first_mut() {
            Some(Screen::Dashboard(state)) => Some(state),
            _ => None,
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        let loading = match self.current_screen_mut() {
            Screen::Dashboard(state) => &mut state.loading,
            Screen::LinkStudent(state) => &mut state.loading,
            Screen::Payment(state) => &mut state.resolution,
            Screen::PaymentStatus(state) => &mut state.loading,
            Screen::History(state) => &mut state.loading,
            Screen::Settings(state) => &mut state.saving,
            Screen::Fees(_) | Screen::Logs(_) => return None,
        };

        match loading {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone)]
pub struct DashboardState {
    pub students: Vec<Student>,
    /// Active-year assignment per student id
    pub assignments: HashMap<Uuid, FeeAssignment>,
    pub loading: LoadingState,
    pub selected_index: usize,
    pub unlink_candidate: Option<Student>,
}

impl DashboardState {
    pub fn selected_student(&self) -> Option<&Student> {
        self.students.get(self.selected_index)
    }

    pub fn assignment_for(&self, student_id: Uuid) -> Option<&FeeAssignment> {
        self.assignments.get(&student_id)
    }

    pub fn select_next(&mut self) {
        if !self.students.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.students.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.students.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.students.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    /// Sum of balances across linked children.
    pub fn total_balance(&self) -> Money {
        self.assignments.values().map(FeeAssignment::balance).sum()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LinkStudentState {
    pub input: String,
    pub loading: LoadingState,
    /// Student awaiting link confirmation
    pub found: Option<Student>,
}

#[derive(Debug, Clone)]
pub struct FeesState {
    pub student: Student,
    pub assignment: Option<FeeAssignment>,
    pub table_state: RefCell<TableState>,
}

impl FeesState {
    pub fn new(student: Student, assignment: Option<FeeAssignment>) -> Self {
        Self {
            student,
            assignment,
            table_state: RefCell::new(TableState::default().with_selected(0)),
        }
    }

    pub fn installments(&self) -> &[Installment] {
        self.assignment
            .as_ref()
            .and_then(|a| a.payment_plan.as_ref())
            .map(|p| p.installments())
            .unwrap_or(&[])
    }

    pub fn selected_installment(&self) -> Option<&Installment> {
        let selected = self.table_state.borrow().selected()?;
        self.installments().get(selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    Phone,
    Amount,
    Month,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub phone: String,
    pub amount: String,
    pub focus: PaymentField,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub enum PaymentPhase {
    #[default]
    Editing,
    Confirming(PaymentDraft),
    Submitting(PaymentDraft),
}

#[derive(Debug, Clone)]
pub struct PaymentState {
    pub student: Student,
    /// Assignment handed over by the previous screen, if any
    pub assignment: Option<FeeAssignment>,
    pub preselected_installment: Option<u32>,
    pub today: NaiveDate,
    pub resolution: LoadingState,
    pub plan: Option<ResolvedPlan>,
    pub form: PaymentForm,
    pub phase: PaymentPhase,
}

impl PaymentState {
    pub fn new(
        student: Student,
        assignment: Option<FeeAssignment>,
        preselected_installment: Option<u32>,
        phone: Option<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            student,
            assignment,
            preselected_installment,
            today,
            resolution: LoadingState::NotStarted,
            plan: None,
            form: PaymentForm {
                phone: phone.unwrap_or_default(),
                amount: String::new(),
                focus: PaymentField::Phone,
            },
            phase: PaymentPhase::Editing,
        }
    }

    /// Resolve the plan of `assignment` and pre-fill the amount field.
    pub fn apply_assignment(&mut self, assignment: FeeAssignment, locale: &Locale) {
        match plan::resolve_plan(&assignment, self.preselected_installment, self.today) {
            Ok(resolved) => {
                self.form.amount = resolved
                    .payable
                    .amount()
                    .map(crate::i18n::format::format_amount_input)
                    .unwrap_or_default();
                self.plan = Some(resolved);
                self.resolution = LoadingState::Loaded;
            }
            Err(e) => {
                tracing::warn!("Could not resolve plan for {}: {:?}", self.student.id, e);
                self.plan = None;
                self.resolution = LoadingState::Error(locale.t(e.message_key()).to_string());
            }
        }
        self.assignment = Some(assignment);
    }

    /// Fields that take focus, in tab order.
    pub fn focusable_fields(&self) -> Vec<PaymentField> {
        let mut fields = vec![PaymentField::Phone];
        if let Some(ref resolved) = self.plan {
            if resolved.payable.amount_editable() {
                fields.push(PaymentField::Amount);
            }
            if matches!(resolved.payable, crate::payments::PayablePlan::Monthly { .. }) {
                fields.push(PaymentField::Month);
            }
        }
        fields
    }

    pub fn focus_next(&mut self, forward: bool) {
        let fields = self.focusable_fields();
        let current = fields
            .iter()
            .position(|f| *f == self.form.focus)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.form.focus = fields[next];
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, PaymentPhase::Submitting(_))
    }
}

#[derive(Debug, Clone)]
pub struct PaymentStatusState {
    pub student: Student,
    pub draft: PaymentDraft,
    pub initiated: InitiatedPayment,
    /// Latest `payments` row, once read back
    pub payment: Option<Payment>,
    pub loading: LoadingState,
}

#[derive(Debug, Clone)]
pub struct HistoryState {
    pub student: Student,
    pub payments: Vec<Payment>,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl HistoryState {
    pub fn new(student: Student) -> Self {
        Self {
            student,
            payments: Vec::new(),
            loading: LoadingState::loading(),
            table_state: RefCell::default(),
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    #[default]
    Language,
    Phone,
}

#[derive(Default, Debug, Clone)]
pub struct SettingsState {
    pub focus: SettingsField,
    pub phone_input: String,
    pub editing_phone: bool,
    pub saving: LoadingState,
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select(Some(self.num_items() - 1));
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

impl Scrollable for FeesState {
    fn num_items(&self) -> usize {
        self.installments().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for HistoryState {
    fn num_items(&self) -> usize {
        self.payments.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
