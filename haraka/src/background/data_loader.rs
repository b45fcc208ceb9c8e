use crate::events::DataEvent;
use crate::i18n::Language;
use crate::payments::ResolutionError;
use crate::preferences::{PreferenceStore, Preferences};
use haraka_api::{
    endpoints::{
        academic_years::AcademicYear, fee_assignments::FeeAssignment, parents::Parent,
        payments::InitiatePayment, students::Student,
    },
    HarakaApiError, PaymentsClient, Request, SupabaseClient,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// The reads the dashboard and plan resolution are built from.
pub(crate) trait FeeBackend {
    async fn parent_for_user(&self, user_id: Uuid) -> Result<Option<Parent>, HarakaApiError>;
    async fn linked_students(&self, parent_id: Uuid) -> Result<Vec<Student>, HarakaApiError>;
    async fn active_year(&self) -> Result<Option<AcademicYear>, HarakaApiError>;
    async fn assignments(
        &self,
        student_ids: Vec<Uuid>,
        academic_year_id: Uuid,
    ) -> Result<Vec<FeeAssignment>, HarakaApiError>;
    async fn assignment(
        &self,
        student_id: Uuid,
        academic_year_id: Uuid,
    ) -> Result<Option<FeeAssignment>, HarakaApiError>;
}

impl FeeBackend for SupabaseClient {
    async fn parent_for_user(&self, user_id: Uuid) -> Result<Option<Parent>, HarakaApiError> {
        self.fetch_one(Request::parents().for_user(user_id)).await
    }

    async fn linked_students(&self, parent_id: Uuid) -> Result<Vec<Student>, HarakaApiError> {
        let links = self.fetch(Request::students().linked(parent_id)).await?;
        Ok(links.into_iter().map(|link| link.student).collect())
    }

    async fn active_year(&self) -> Result<Option<AcademicYear>, HarakaApiError> {
        self.fetch_one(Request::academic_years().active()).await
    }

    async fn assignments(
        &self,
        student_ids: Vec<Uuid>,
        academic_year_id: Uuid,
    ) -> Result<Vec<FeeAssignment>, HarakaApiError> {
        self.fetch(Request::fee_assignments().for_students(student_ids, academic_year_id))
            .await
    }

    async fn assignment(
        &self,
        student_id: Uuid,
        academic_year_id: Uuid,
    ) -> Result<Option<FeeAssignment>, HarakaApiError> {
        self.fetch_one(Request::fee_assignments().for_student(student_id, academic_year_id))
            .await
    }
}

async fn fetch_dashboard<B: FeeBackend>(
    backend: &B,
    user_id: Uuid,
    data_tx: &mpsc::UnboundedSender<DataEvent>,
) -> Result<(), HarakaApiError> {
    let parent = backend.parent_for_user(user_id).await?.ok_or_else(|| {
        HarakaApiError::NotFound("No parent profile for this account".to_string())
    })?;
    let parent_id = parent.id;
    let _ = data_tx.send(DataEvent::ParentLoaded { parent });

    let students = backend.linked_students(parent_id).await?;
    tracing::debug!("Parent {} has {} linked students", parent_id, students.len());
    let student_ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();
    let _ = data_tx.send(DataEvent::LinkedStudentsLoaded { students });

    let academic_year = backend.active_year().await?;

    let assignments = match academic_year {
        Some(ref year) if !student_ids.is_empty() => {
            backend.assignments(student_ids, year.id).await?
        }
        Some(_) => Vec::new(),
        None => {
            tracing::warn!("No active academic year");
            Vec::new()
        }
    };

    tracing::info!("Loaded {} fee assignments", assignments.len());
    let _ = data_tx.send(DataEvent::FeeSummaryLoaded {
        academic_year,
        assignments,
    });
    Ok(())
}

async fn fetch_assignment<B: FeeBackend>(
    backend: &B,
    student_id: Uuid,
) -> Result<FeeAssignment, ResolutionError> {
    let remote = |e: HarakaApiError| ResolutionError::Remote(e.user_message());

    let year = backend
        .active_year()
        .await
        .map_err(remote)?
        .ok_or(ResolutionError::NoActiveYear)?;

    backend
        .assignment(student_id, year.id)
        .await
        .map_err(remote)?
        .ok_or(ResolutionError::NoAssignment)
}

/// Runs backend calls off the UI loop and reports back as [`DataEvent`]s.
#[derive(Clone)]
pub struct DataLoader {
    pub supabase: Arc<SupabaseClient>,
    pub payments: Arc<PaymentsClient>,
    /// Auth user id of the signed-in parent
    pub user_id: Uuid,
    pub preferences: Arc<PreferenceStore>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(
        supabase: Arc<SupabaseClient>,
        payments: Arc<PaymentsClient>,
        user_id: Uuid,
        preferences: Arc<PreferenceStore>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            supabase,
            payments,
            user_id,
            preferences,
            data_tx,
        }
    }

    /// Parent, then linked children, then the active year, then fee assignments.
    /// Each step reports as soon as it lands; the first failure stops the chain.
    pub async fn load_dashboard(&self) {
        tracing::info!("Loading dashboard for user {}", self.user_id);

        if let Err(e) = fetch_dashboard(self.supabase.as_ref(), self.user_id, &self.data_tx).await
        {
            tracing::error!("Failed to load dashboard: {}", e);
            let _ = self.data_tx.send(DataEvent::DashboardLoadFailed {
                error: e.user_message(),
            });
        }
    }

    /// Active year, then this student's assignment with its plan.
    pub async fn resolve_payment_plan(&self, student_id: Uuid) {
        tracing::info!("Resolving payment plan for student {}", student_id);

        let event = match fetch_assignment(self.supabase.as_ref(), student_id).await {
            Ok(assignment) => DataEvent::PaymentPlanLoaded {
                student_id,
                assignment,
            },
            Err(error) => {
                tracing::warn!("Plan resolution failed for {}: {:?}", student_id, error);
                DataEvent::PaymentPlanFailed { student_id, error }
            }
        };
        let _ = self.data_tx.send(event);
    }

    /// POST the payment, then read back the `payments` row it created.
    pub async fn initiate_payment(&self, request: InitiatePayment) {
        tracing::info!(
            "Initiating payment of {} from {}",
            request.amount(),
            request.phone_number()
        );

        let result = self
            .payments
            .send(request)
            .await
            .and_then(|response| response.into_result());

        match result {
            Ok(initiated) => {
                tracing::info!("Payment initiated, transaction {}", initiated.transaction_id);
                let payment_id = initiated.payment_id.clone();
                let _ = self
                    .data_tx
                    .send(DataEvent::PaymentInitiated { payment: initiated });

                if let Some(payment_id) = payment_id {
                    self.load_payment(payment_id).await;
                }
            }
            Err(e) => {
                tracing::error!("Payment initiation failed: {}", e);
                let _ = self.data_tx.send(DataEvent::PaymentFailed {
                    error: e.user_message(),
                });
            }
        }
    }

    pub async fn load_payment(&self, payment_id: String) {
        tracing::debug!("Reading payment {}", payment_id);

        let event = match self
            .supabase
            .fetch_one(Request::payments().get(payment_id.as_str()))
            .await
        {
            Ok(Some(payment)) => DataEvent::PaymentStatusLoaded { payment },
            Ok(None) => DataEvent::PaymentStatusFailed {
                error: format!("Payment {} not found", payment_id),
            },
            Err(e) => {
                tracing::warn!("Failed to read payment {}: {}", payment_id, e);
                DataEvent::PaymentStatusFailed {
                    error: e.user_message(),
                }
            }
        };
        let _ = self.data_tx.send(event);
    }

    pub async fn load_payment_history(&self, student_id: Uuid) {
        tracing::info!("Loading payment history for student {}", student_id);

        match self
            .supabase
            .fetch(Request::payments().history(student_id))
            .await
        {
            Ok(payments) => {
                tracing::info!("Loaded {} payments", payments.len());
                let _ = self.data_tx.send(DataEvent::PaymentHistoryLoaded {
                    student_id,
                    payments,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load payment history: {}", e);
                let _ = self.data_tx.send(DataEvent::PaymentHistoryFailed {
                    student_id,
                    error: e.user_message(),
                });
            }
        }
    }

    pub async fn find_student(&self, registration_number: String) {
        tracing::info!("Looking up registration number {}", registration_number);

        let event = match self
            .supabase
            .fetch_one(Request::students().find_by_registration(registration_number.as_str()))
            .await
        {
            Ok(Some(student)) => DataEvent::StudentFound { student },
            Ok(None) => DataEvent::StudentNotFound {
                registration_number,
            },
            Err(e) => {
                tracing::error!("Student lookup failed: {}", e);
                DataEvent::LinkFailed {
                    error: e.user_message(),
                }
            }
        };
        let _ = self.data_tx.send(event);
    }

    pub async fn link_student(&self, parent_id: Uuid, student: Student) {
        tracing::info!("Linking student {} to parent {}", student.id, parent_id);

        match self
            .supabase
            .execute(Request::students().link(parent_id, student.id))
            .await
        {
            Ok(()) => {
                let _ = self.data_tx.send(DataEvent::StudentLinked { student });
                self.load_dashboard().await;
            }
            Err(e) => {
                tracing::error!("Failed to link student: {}", e);
                let _ = self.data_tx.send(DataEvent::LinkFailed {
                    error: e.user_message(),
                });
            }
        }
    }

    pub async fn unlink_student(&self, parent_id: Uuid, student_id: Uuid) {
        tracing::info!("Unlinking student {} from parent {}", student_id, parent_id);

        match self
            .supabase
            .execute(Request::students().unlink(parent_id, student_id))
            .await
        {
            Ok(()) => {
                let _ = self
                    .data_tx
                    .send(DataEvent::StudentUnlinked { student_id });
                self.load_dashboard().await;
            }
            Err(e) => {
                tracing::error!("Failed to unlink student: {}", e);
                let _ = self.data_tx.send(DataEvent::LinkFailed {
                    error: e.user_message(),
                });
            }
        }
    }

    pub async fn update_phone(&self, parent_id: Uuid, phone: String) {
        tracing::info!("Updating phone number of parent {}", parent_id);

        let event = match self
            .supabase
            .fetch_one(Request::parents().update_profile(parent_id).phone(phone))
            .await
        {
            Ok(Some(parent)) => DataEvent::ParentUpdated { parent },
            Ok(None) => DataEvent::ParentUpdateFailed {
                error: "Profile was not updated".to_string(),
            },
            Err(e) => {
                tracing::error!("Failed to update profile: {}", e);
                DataEvent::ParentUpdateFailed {
                    error: e.user_message(),
                }
            }
        };
        let _ = self.data_tx.send(event);
    }

    /// Persist the language chosen as change number `revision`.
    pub async fn save_language(&self, language: Language, revision: u64) {
        let store = self.preferences.clone();
        let saved = tokio::task::spawn_blocking(move || {
            store.save_revision(&Preferences { language }, revision)
        })
        .await;

        let error = match saved {
            Ok(Ok(true)) => {
                tracing::info!("Saved language preference {}", language.code());
                return;
            }
            Ok(Ok(false)) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        tracing::error!("Failed to save language preference: {}", error);
        let _ = self.data_tx.send(DataEvent::LoadError { error });
    }
}
