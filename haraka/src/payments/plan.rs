//! Working out what a parent owes for one fee assignment.

use chrono::NaiveDate;
use haraka_api::endpoints::{
    fee_assignments::{FeeAssignment, Installment, PlanKind, PlanType},
    Money,
};
use uuid::Uuid;

/// Monthly plans are split evenly over the ten months of the school year.
pub const SCHOOL_MONTHS: [SchoolMonth; 10] = [
    SchoolMonth::September,
    SchoolMonth::October,
    SchoolMonth::November,
    SchoolMonth::December,
    SchoolMonth::January,
    SchoolMonth::February,
    SchoolMonth::March,
    SchoolMonth::April,
    SchoolMonth::May,
    SchoolMonth::June,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchoolMonth {
    September,
    October,
    November,
    December,
    January,
    February,
    March,
    April,
    May,
    June,
}

impl SchoolMonth {
    /// Lower-case English name, as the payments API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::September => "september",
            Self::October => "october",
            Self::November => "november",
            Self::December => "december",
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
        }
    }

    /// Translation key of the month name.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::September => "month.september",
            Self::October => "month.october",
            Self::November => "month.november",
            Self::December => "month.december",
            Self::January => "month.january",
            Self::February => "month.february",
            Self::March => "month.march",
            Self::April => "month.april",
            Self::May => "month.may",
            Self::June => "month.june",
        }
    }

    /// Position in [`SCHOOL_MONTHS`].
    pub fn index(&self) -> usize {
        SCHOOL_MONTHS
            .iter()
            .position(|m| m == self)
            .unwrap_or_default()
    }

    pub fn shifted(&self, forward: bool) -> Self {
        let len = SCHOOL_MONTHS.len();
        let index = if forward {
            (self.index() + 1) % len
        } else {
            (self.index() + len - 1) % len
        };
        SCHOOL_MONTHS[index]
    }
}

/// The amount a parent can pay right now, shaped by the plan type.
#[derive(Debug, Clone, PartialEq)]
pub enum PayablePlan {
    OneTime {
        total_due: Money,
    },
    Monthly {
        total_due: Money,
        selected_month: Option<SchoolMonth>,
    },
    Installment {
        installment: Installment,
    },
}

impl PayablePlan {
    pub fn plan_type(&self) -> PlanType {
        match self {
            Self::OneTime { .. } => PlanType::OneTime,
            Self::Monthly { .. } => PlanType::Monthly,
            Self::Installment { .. } => PlanType::Installment,
        }
    }

    /// Amount due, or `None` for a monthly plan with no month picked yet.
    pub fn amount(&self) -> Option<Money> {
        match self {
            Self::OneTime { total_due } => Some(*total_due),
            Self::Monthly {
                total_due,
                selected_month: Some(_),
            } => Some(monthly_amount(*total_due)),
            Self::Monthly { .. } => None,
            Self::Installment { installment } => Some(installment.amount),
        }
    }

    /// Only installment amounts may be changed by the parent.
    pub fn amount_editable(&self) -> bool {
        matches!(self, Self::Installment { .. })
    }

    pub fn installment_number(&self) -> Option<u32> {
        match self {
            Self::Installment { installment } => Some(installment.installment_number),
            _ => None,
        }
    }

    pub fn selected_month(&self) -> Option<SchoolMonth> {
        match self {
            Self::Monthly { selected_month, .. } => *selected_month,
            _ => None,
        }
    }

    pub fn select_month(&mut self, month: SchoolMonth) {
        if let Self::Monthly { selected_month, .. } = self {
            *selected_month = Some(month);
        }
    }
}

/// A resolved plan together with the plan row it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlan {
    pub plan_id: Uuid,
    pub payable: PayablePlan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    NoActiveYear,
    NoAssignment,
    MissingPlan,
    EmptySchedule,
    Remote(String),
}

impl ResolutionError {
    /// Translation key of the user-facing message. `Remote` carries its own text.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::NoActiveYear => "payment.error.no_active_year",
            Self::NoAssignment => "payment.error.no_assignment",
            Self::MissingPlan => "payment.error.missing_plan",
            Self::EmptySchedule => "payment.error.empty_schedule",
            Self::Remote(_) => "payment.error.remote",
        }
    }
}

/// One tenth of the total, rounded half away from zero to cents.
pub fn monthly_amount(total_due: Money) -> Money {
    total_due.share(SCHOOL_MONTHS.len() as u32)
}

/// First unpaid installment due today or later, else the first one listed.
pub fn select_installment(installments: &[Installment], today: NaiveDate) -> Option<&Installment> {
    installments
        .iter()
        .find(|i| !i.paid && i.due_date >= today)
        .or_else(|| installments.first())
}

pub fn resolve_plan(
    assignment: &FeeAssignment,
    preselected_installment: Option<u32>,
    today: NaiveDate,
) -> Result<ResolvedPlan, ResolutionError> {
    let plan = assignment
        .payment_plan
        .as_ref()
        .ok_or(ResolutionError::MissingPlan)?;

    let payable = match &plan.kind {
        PlanKind::OneTime => PayablePlan::OneTime {
            total_due: assignment.total_due,
        },
        PlanKind::Monthly => PayablePlan::Monthly {
            total_due: assignment.total_due,
            selected_month: None,
        },
        PlanKind::Installment { installments } => {
            let preselected = preselected_installment.and_then(|number| {
                let found = installments
                    .iter()
                    .find(|i| i.installment_number == number);
                if found.is_none() {
                    tracing::warn!("Installment {} not in plan {}, choosing by due date", number, plan.id);
                }
                found
            });

            let installment = preselected
                .or_else(|| select_installment(installments, today))
                .ok_or(ResolutionError::EmptySchedule)?;

            PayablePlan::Installment {
                installment: installment.clone(),
            }
        }
    };

    tracing::debug!(
        "Resolved {} plan {} for assignment {}",
        payable.plan_type().as_str(),
        plan.id,
        assignment.id
    );

    Ok(ResolvedPlan {
        plan_id: plan.id,
        payable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use haraka_api::endpoints::fee_assignments::{AssignmentStatus, PaymentPlan};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn installment(number: u32, due: NaiveDate, paid: bool) -> Installment {
        Installment {
            installment_number: number,
            amount: Money::from(300),
            due_date: due,
            paid,
        }
    }

    fn assignment(kind: PlanKind, total_due: Money) -> FeeAssignment {
        FeeAssignment {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            academic_year_id: Uuid::new_v4(),
            payment_plan_id: None,
            total_due,
            paid_amount: Money::ZERO,
            status: AssignmentStatus::Active,
            payment_plan: Some(PaymentPlan {
                id: Uuid::new_v4(),
                discount_percentage: None,
                kind,
            }),
        }
    }

    #[test]
    fn one_time_amount_is_total_due() {
        let a = assignment(PlanKind::OneTime, Money::from_cents(25_000));
        let resolved = resolve_plan(&a, None, date(2026, 10, 19)).unwrap();

        assert_eq!(resolved.payable.amount().unwrap().to_fixed(), "250.00");
        assert!(!resolved.payable.amount_editable());
        assert_eq!(resolved.plan_id, a.payment_plan.unwrap().id);
    }

    #[test]
    fn monthly_amount_waits_for_month() {
        let a = assignment(PlanKind::Monthly, Money::from(1000));
        let mut payable = resolve_plan(&a, None, date(2026, 10, 19)).unwrap().payable;

        assert_eq!(payable.amount(), None);
        payable.select_month(SchoolMonth::March);
        assert_eq!(payable.amount().unwrap().to_fixed(), "100.00");
        payable.select_month(SchoolMonth::September);
        assert_eq!(payable.amount().unwrap().to_fixed(), "100.00");
        assert_eq!(payable.selected_month(), Some(SchoolMonth::September));
    }

    #[test]
    fn monthly_share_rounds_to_cents() {
        assert_eq!(monthly_amount(Money::from(1001)).to_fixed(), "100.10");
        assert_eq!(monthly_amount(Money::from_cents(33_333)).to_fixed(), "33.33");
    }

    #[test]
    fn picks_first_unpaid_installment_due_from_today() {
        let today = date(2026, 10, 19);
        let schedule = vec![
            installment(1, date(2026, 9, 15), false),
            installment(2, date(2026, 11, 15), true),
            installment(3, date(2027, 1, 15), false),
        ];
        assert_eq!(
            select_installment(&schedule, today).unwrap().installment_number,
            3
        );

        let due_today = vec![installment(1, today, false)];
        assert_eq!(
            select_installment(&due_today, today).unwrap().installment_number,
            1
        );
    }

    #[test]
    fn falls_back_to_first_installment_when_all_past() {
        let today = date(2027, 7, 1);
        let schedule = vec![
            installment(1, date(2026, 9, 15), true),
            installment(2, date(2027, 1, 15), false),
        ];
        assert_eq!(
            select_installment(&schedule, today).unwrap().installment_number,
            1
        );
        assert!(select_installment(&[], today).is_none());
    }

    #[test]
    fn preselected_installment_wins() {
        let schedule = vec![
            installment(1, date(2026, 9, 15), false),
            installment(2, date(2027, 1, 15), false),
        ];
        let a = assignment(
            PlanKind::Installment {
                installments: schedule,
            },
            Money::from(600),
        );

        let resolved = resolve_plan(&a, Some(2), date(2026, 8, 1)).unwrap();
        assert_eq!(resolved.payable.installment_number(), Some(2));
        assert!(resolved.payable.amount_editable());

        let fallback = resolve_plan(&a, Some(9), date(2026, 8, 1)).unwrap();
        assert_eq!(fallback.payable.installment_number(), Some(1));
    }

    #[test]
    fn empty_schedule_and_missing_plan_are_errors() {
        let a = assignment(
            PlanKind::Installment {
                installments: vec![],
            },
            Money::from(600),
        );
        assert_eq!(
            resolve_plan(&a, None, date(2026, 10, 19)),
            Err(ResolutionError::EmptySchedule)
        );

        let mut a = assignment(PlanKind::OneTime, Money::from(600));
        a.payment_plan = None;
        assert_eq!(
            resolve_plan(&a, None, date(2026, 10, 19)),
            Err(ResolutionError::MissingPlan)
        );
    }

    #[test]
    fn school_months_wrap_around() {
        assert_eq!(SchoolMonth::June.shifted(true), SchoolMonth::September);
        assert_eq!(SchoolMonth::September.shifted(false), SchoolMonth::June);
        assert_eq!(SchoolMonth::December.shifted(true), SchoolMonth::January);
        assert_eq!(SchoolMonth::May.as_str(), "may");
    }
}
