use super::Money;
use super::fee_assignments::PlanType;
use crate::HarakaApiError;
use crate::error::server_message;
use crate::macros::setter;
use crate::rest::{RestQuery, RestRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};
use uuid::Uuid;

const HISTORY_LIMIT: usize = 50;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub amount: Money,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub installment_number: Option<u32>,
    pub created_at: DateTime<Utc>,
}

// Requests

#[derive(Debug, Clone)]
pub struct ListPayments {
    student_id: Uuid,
}

impl ListPayments {
    pub fn new(student_id: Uuid) -> Self {
        Self { student_id }
    }
}

impl RestRequest for ListPayments {
    type Row = Payment;
    type Body = ();

    fn table(&self) -> &'static str {
        "payments"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select("*")
            .eq("student_id", self.student_id)
            .order("created_at", false)
            .limit(HISTORY_LIMIT)
    }
}

#[derive(Debug, Clone)]
pub struct GetPayment {
    payment_id: String,
}

impl GetPayment {
    pub fn new(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
        }
    }
}

impl RestRequest for GetPayment {
    type Row = Payment;
    type Body = ();

    fn table(&self) -> &'static str {
        "payments"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select("*")
            .eq("id", &self.payment_id)
            .limit(1)
    }
}

/// Body of `POST /api/payments/initiate`. Absent values are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePayment {
    student_id: Uuid,
    amount: Money,
    phone_number: String,
    payment_plan_id: Option<Uuid>,
    installment_number: Option<u32>,
    payment_type: PlanType,
    selected_month: Option<String>,
}

impl InitiatePayment {
    pub fn new<T>(student_id: Uuid, amount: T, phone_number: String, payment_type: PlanType) -> Self
    where
        T: Into<Money>,
    {
        Self {
            student_id,
            amount: amount.into(),
            phone_number,
            payment_plan_id: None,
            installment_number: None,
            payment_type,
            selected_month: None,
        }
    }

    setter!(opt payment_plan_id: Uuid);
    setter!(opt installment_number: u32);
    setter!(opt selected_month: String);

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

impl Request for InitiatePayment {
    type Data = Self;
    type Response = InitiatePaymentResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/api/payments/initiate".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentResponse {
    #[serde(default)]
    pub success: bool,
    pub payment_id: Option<String>,
    pub transaction_id: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

/// A payment the provider accepted and is now tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatedPayment {
    pub payment_id: Option<String>,
    pub transaction_id: String,
}

impl InitiatePaymentResponse {
    /// A 2xx answer only counts as accepted when it says so and carries a
    /// transaction id.
    pub fn into_result(self) -> Result<InitiatedPayment, HarakaApiError> {
        match (self.success, self.transaction_id) {
            (true, Some(transaction_id)) if !transaction_id.is_empty() => Ok(InitiatedPayment {
                payment_id: self.payment_id,
                transaction_id,
            }),
            _ => Err(HarakaApiError::Rejected {
                status: None,
                message: server_message(self.error, self.message)
                    .unwrap_or_else(|| "Payment initiation failed".to_string()),
            }),
        }
    }
}
