use super::Money;
use crate::rest::{RestQuery, RestRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const FEE_ASSIGNMENT_SELECT: &str = "*,payment_plans(*)";
const PAYABLE_STATUSES: [&str; 2] = ["active", "fully_paid"];

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    FullyPaid,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    OneTime,
    Monthly,
    Installment,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Monthly => "monthly",
            Self::Installment => "installment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub installment_number: u32,
    pub amount: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

/// The shape of an obligation. Only installment plans carry a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanKind {
    OneTime,
    Monthly,
    Installment { installments: Vec<Installment> },
}

impl PlanKind {
    pub fn plan_type(&self) -> PlanType {
        match self {
            Self::OneTime => PlanType::OneTime,
            Self::Monthly => PlanType::Monthly,
            Self::Installment { .. } => PlanType::Installment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaymentPlanRow", into = "PaymentPlanRow")]
pub struct PaymentPlan {
    pub id: Uuid,
    pub discount_percentage: Option<f64>,
    pub kind: PlanKind,
}

impl PaymentPlan {
    pub fn plan_type(&self) -> PlanType {
        self.kind.plan_type()
    }

    pub fn installments(&self) -> &[Installment] {
        match &self.kind {
            PlanKind::Installment { installments } => installments,
            _ => &[],
        }
    }
}

/// `payment_plans` row as stored. The schedule column is ignored unless the
/// plan type is `installment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaymentPlanRow {
    id: Uuid,
    #[serde(rename = "type")]
    plan_type: PlanType,
    #[serde(default)]
    discount_percentage: Option<f64>,
    #[serde(default)]
    installments: Option<Vec<Installment>>,
}

impl From<PaymentPlanRow> for PaymentPlan {
    fn from(row: PaymentPlanRow) -> Self {
        let kind = match row.plan_type {
            PlanType::OneTime => PlanKind::OneTime,
            PlanType::Monthly => PlanKind::Monthly,
            PlanType::Installment => {
                let mut installments = row.installments.unwrap_or_default();
                installments.sort_by_key(|i| i.installment_number);
                PlanKind::Installment { installments }
            }
        };

        Self {
            id: row.id,
            discount_percentage: row.discount_percentage,
            kind,
        }
    }
}

impl From<PaymentPlan> for PaymentPlanRow {
    fn from(plan: PaymentPlan) -> Self {
        let plan_type = plan.plan_type();
        let installments = match plan.kind {
            PlanKind::Installment { installments } => Some(installments),
            _ => None,
        };

        Self {
            id: plan.id,
            plan_type,
            discount_percentage: plan.discount_percentage,
            installments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeAssignment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub academic_year_id: Uuid,
    #[serde(default)]
    pub payment_plan_id: Option<Uuid>,
    pub total_due: Money,
    #[serde(default)]
    pub paid_amount: Money,
    pub status: AssignmentStatus,
    #[serde(rename = "payment_plans", default)]
    pub payment_plan: Option<PaymentPlan>,
}

impl FeeAssignment {
    /// Outstanding amount, never below zero.
    pub fn balance(&self) -> Money {
        let balance = self.total_due - self.paid_amount;
        if balance.is_negative() {
            Money::ZERO
        } else {
            balance
        }
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetFeeAssignment {
    student_id: Uuid,
    academic_year_id: Uuid,
}

impl GetFeeAssignment {
    pub fn new(student_id: Uuid, academic_year_id: Uuid) -> Self {
        Self {
            student_id,
            academic_year_id,
        }
    }
}

impl RestRequest for GetFeeAssignment {
    type Row = FeeAssignment;
    type Body = ();

    fn table(&self) -> &'static str {
        "student_fee_assignments"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select(FEE_ASSIGNMENT_SELECT)
            .eq("student_id", self.student_id)
            .eq("academic_year_id", self.academic_year_id)
            .in_list("status", PAYABLE_STATUSES)
            .limit(1)
    }
}

#[derive(Debug, Clone)]
pub struct ListFeeAssignments {
    student_ids: Vec<Uuid>,
    academic_year_id: Uuid,
}

impl ListFeeAssignments {
    pub fn new(student_ids: Vec<Uuid>, academic_year_id: Uuid) -> Self {
        Self {
            student_ids,
            academic_year_id,
        }
    }
}

impl RestRequest for ListFeeAssignments {
    type Row = FeeAssignment;
    type Body = ();

    fn table(&self) -> &'static str {
        "student_fee_assignments"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select(FEE_ASSIGNMENT_SELECT)
            .in_list("student_id", &self.student_ids)
            .eq("academic_year_id", self.academic_year_id)
            .in_list("status", PAYABLE_STATUSES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSIGNMENT: &str = r#"{
        "id":"6f1d2c3b-4a5e-4f60-8a71-92b3c4d5e6f7",
        "student_id":"2b0c1a8e-7c55-4c0f-8a9d-3e4b5c6d7e8f",
        "academic_year_id":"9a8b7c6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d",
        "payment_plan_id":"1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f",
        "total_due":1200,
        "paid_amount":400.5,
        "status":"active",
        "payment_plans":{
            "id":"1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f",
            "type":"installment",
            "discount_percentage":5,
            "installments":[
                {"installment_number":2,"amount":600,"due_date":"2027-01-15","paid":false},
                {"installment_number":1,"amount":600,"due_date":"2026-09-15","paid":true}
            ]
        }
    }"#;

    #[test]
    fn decodes_assignment_with_embedded_plan() {
        let assignment: FeeAssignment = serde_json::from_str(ASSIGNMENT).unwrap();
        let plan = assignment.payment_plan.as_ref().unwrap();

        assert_eq!(assignment.status, AssignmentStatus::Active);
        assert_eq!(assignment.balance().to_fixed(), "799.50");
        assert_eq!(plan.plan_type(), PlanType::Installment);
        assert_eq!(plan.discount_percentage, Some(5.0));
        let numbers: Vec<u32> = plan
            .installments()
            .iter()
            .map(|i| i.installment_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn monthly_plan_drops_schedule() {
        let json = r#"{"id":"1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f","type":"monthly",
            "installments":[{"installment_number":1,"amount":10,"due_date":"2026-09-01"}]}"#;
        let plan: PaymentPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.kind, PlanKind::Monthly);
        assert!(plan.installments().is_empty());
    }

    #[test]
    fn unknown_plan_type_fails_to_decode() {
        let json = r#"{"id":"1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f","type":"weekly"}"#;
        assert!(serde_json::from_str::<PaymentPlan>(json).is_err());
    }

    #[test]
    fn overpaid_balance_is_zero() {
        let mut assignment: FeeAssignment = serde_json::from_str(ASSIGNMENT).unwrap();
        assignment.paid_amount = Money::from(1500);
        assert_eq!(assignment.balance(), Money::ZERO);
    }

    #[test]
    fn filters_out_cancelled_assignments() {
        let request = GetFeeAssignment::new(Uuid::nil(), Uuid::nil());
        let pairs = request.query().pairs();
        assert!(pairs.contains(&("status".to_string(), "in.(active,fully_paid)".to_string())));
        assert!(pairs.contains(&("select".to_string(), "*,payment_plans(*)".to_string())));
    }
}
