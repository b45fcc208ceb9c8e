pub mod dashboard_screen;
pub mod fees_screen;
pub mod history_screen;
pub mod link_student_screen;
pub mod logs_screen;
pub mod payment_screen;
pub mod payment_status_screen;
pub mod settings_screen;

use crate::state::{
    DashboardState, FeesState, HistoryState, LinkStudentState, LogsState, PaymentState,
    PaymentStatusState, SettingsState,
};

#[derive(Debug, Clone)]
pub enum Screen {
    Dashboard(DashboardState),
    LinkStudent(LinkStudentState),
    Fees(FeesState),
    Payment(Box<PaymentState>),
    PaymentStatus(PaymentStatusState),
    History(HistoryState),
    Settings(SettingsState),
    Logs(LogsState),
}
