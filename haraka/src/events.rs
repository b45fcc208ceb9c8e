use crate::payments::ResolutionError;
use haraka_api::endpoints::{
    academic_years::AcademicYear,
    fee_assignments::FeeAssignment,
    parents::Parent,
    payments::{InitiatedPayment, Payment},
    students::Student,
};
use uuid::Uuid;

/// Commands to execute (user actions → background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,
    NavigateHome,

    // Dashboard
    LoadDashboard,
    OpenFees {
        student: Box<Student>,
        assignment: Box<Option<FeeAssignment>>,
    },
    LoadPaymentHistory {
        student: Box<Student>,
    },

    // Payment
    OpenPayment {
        student: Box<Student>,
        assignment: Box<Option<FeeAssignment>>,
        installment_number: Option<u32>,
    },
    RetryPaymentPlan,
    SubmitPayment,
    ConfirmPayment,
    CancelPaymentConfirmation,
    RefreshPaymentStatus,

    // Text input (payment form, link student, settings)
    AppendInputChar(char),
    DeleteInputChar,
    NextField,
    PreviousField,
    ShiftMonth {
        forward: bool,
    },

    // Student linking
    OpenLinkStudent,
    FindStudent,
    ConfirmLinkStudent,
    CancelLinkStudent,
    InitiateUnlink,
    ConfirmUnlink,
    CancelUnlink,

    // Settings
    OpenSettings,
    ToggleLanguage,
    EditPhone,
    SavePhone,
    CancelPhoneEdit,

    // Overlays
    DismissAlert,
    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Dashboard, in load order
    ParentLoaded {
        parent: Parent,
    },
    LinkedStudentsLoaded {
        students: Vec<Student>,
    },
    FeeSummaryLoaded {
        academic_year: Option<AcademicYear>,
        assignments: Vec<FeeAssignment>,
    },
    DashboardLoadFailed {
        error: String,
    },

    // Fee-plan resolution
    PaymentPlanLoaded {
        student_id: Uuid,
        assignment: FeeAssignment,
    },
    PaymentPlanFailed {
        student_id: Uuid,
        error: ResolutionError,
    },

    // Payment initiation
    PaymentInitiated {
        payment: InitiatedPayment,
    },
    PaymentFailed {
        error: String,
    },
    PaymentStatusLoaded {
        payment: Payment,
    },
    PaymentStatusFailed {
        error: String,
    },

    // History
    PaymentHistoryLoaded {
        student_id: Uuid,
        payments: Vec<Payment>,
    },
    PaymentHistoryFailed {
        student_id: Uuid,
        error: String,
    },

    // Student linking
    StudentFound {
        student: Student,
    },
    StudentNotFound {
        registration_number: String,
    },
    StudentLinked {
        student: Student,
    },
    StudentUnlinked {
        student_id: Uuid,
    },
    LinkFailed {
        error: String,
    },

    // Settings
    ParentUpdated {
        parent: Parent,
    },
    ParentUpdateFailed {
        error: String,
    },

    // Errors
    LoadError {
        error: String,
    },
}
