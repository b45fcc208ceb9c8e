use super::PaymentForm;
use crate::payments::{phone, PayablePlan, SchoolMonth};
use haraka_api::endpoints::{fee_assignments::PlanType, payments::InitiatePayment, Money};
use std::str::FromStr;
use uuid::Uuid;

/// A validated payment, waiting for the parent's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub amount: Money,
    /// Normalized, `243…`
    pub phone_number: String,
    pub payment_type: PlanType,
    pub installment_number: Option<u32>,
    pub selected_month: Option<SchoolMonth>,
}

impl PaymentDraft {
    pub fn to_request(&self, student_id: Uuid, plan_id: Uuid) -> InitiatePayment {
        let mut request = InitiatePayment::new(
            student_id,
            self.amount,
            self.phone_number.clone(),
            self.payment_type,
        )
        .payment_plan_id(plan_id);

        if let Some(number) = self.installment_number {
            request = request.installment_number(number);
        }
        if let Some(month) = self.selected_month {
            request = request.selected_month(month.as_str());
        }
        request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentValidationError {
    InvalidPhone,
    MonthRequired,
    InvalidAmount,
}

impl PaymentValidationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidPhone => "validation.invalid_phone",
            Self::MonthRequired => "validation.month_required",
            Self::InvalidAmount => "validation.invalid_amount",
        }
    }
}

/// Check the form against the resolved plan. Nothing invalid is ever sent.
pub fn validate_payment_form(
    plan: &PayablePlan,
    form: &PaymentForm,
) -> Result<PaymentDraft, PaymentValidationError> {
    let phone_number = validate_phone(&form.phone)?;

    if matches!(plan, PayablePlan::Monthly { .. }) && plan.selected_month().is_none() {
        return Err(PaymentValidationError::MonthRequired);
    }

    let amount = if plan.amount_editable() {
        parse_amount(&form.amount)
    } else {
        plan.amount()
    };
    // Amounts travel in cents, so check the value that will be sent
    let amount = amount
        .map(|a| a.rounded())
        .filter(Money::is_positive)
        .ok_or(PaymentValidationError::InvalidAmount)?;

    Ok(PaymentDraft {
        amount,
        phone_number,
        payment_type: plan.plan_type(),
        installment_number: plan.installment_number(),
        selected_month: plan.selected_month(),
    })
}

/// Normalize `input` and check it is a mobile-money number.
pub fn validate_phone(input: &str) -> Result<String, PaymentValidationError> {
    let normalized = phone::normalize_phone(input);
    if phone::is_valid_phone(&normalized) {
        Ok(normalized)
    } else {
        Err(PaymentValidationError::InvalidPhone)
    }
}

/// Parse a typed amount. A comma is accepted as the decimal separator.
pub fn parse_amount(input: &str) -> Option<Money> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Money::from_str(&trimmed.replace(',', ".")).ok()
}

/// Registration numbers are matched as typed, minus surrounding whitespace.
pub fn validate_registration_number(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PaymentField;
    use chrono::NaiveDate;
    use haraka_api::endpoints::fee_assignments::Installment;
    use serde_json::json;

    fn form(phone: &str, amount: &str) -> PaymentForm {
        PaymentForm {
            phone: phone.to_string(),
            amount: amount.to_string(),
            focus: PaymentField::Phone,
        }
    }

    fn installment_plan() -> PayablePlan {
        PayablePlan::Installment {
            installment: Installment {
                installment_number: 2,
                amount: Money::from(300),
                due_date: NaiveDate::from_ymd_opt(2027, 1, 15).unwrap(),
                paid: false,
            },
        }
    }

    #[test]
    fn one_time_uses_total_due() {
        let plan = PayablePlan::OneTime {
            total_due: Money::from(250),
        };
        let draft = validate_payment_form(&plan, &form("0812345678", "999")).unwrap();

        assert_eq!(draft.amount.to_fixed(), "250.00");
        assert_eq!(draft.phone_number, "243812345678");
        assert_eq!(draft.payment_type, PlanType::OneTime);
    }

    #[test]
    fn rejects_bad_phone_before_anything_else() {
        let plan = PayablePlan::Monthly {
            total_due: Money::from(1000),
            selected_month: None,
        };
        assert_eq!(
            validate_payment_form(&plan, &form("24381", "")),
            Err(PaymentValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_payment_form(&plan, &form("", "")),
            Err(PaymentValidationError::InvalidPhone)
        );
    }

    #[test]
    fn monthly_requires_month() {
        let mut plan = PayablePlan::Monthly {
            total_due: Money::from(1000),
            selected_month: None,
        };
        assert_eq!(
            validate_payment_form(&plan, &form("812345678", "")),
            Err(PaymentValidationError::MonthRequired)
        );

        plan.select_month(SchoolMonth::October);
        let draft = validate_payment_form(&plan, &form("812345678", "")).unwrap();
        assert_eq!(draft.amount.to_fixed(), "100.00");
        assert_eq!(draft.selected_month, Some(SchoolMonth::October));
    }

    #[test]
    fn installment_amount_is_parsed_from_form() {
        let plan = installment_plan();

        let draft = validate_payment_form(&plan, &form("812345678", "150,5")).unwrap();
        assert_eq!(draft.amount.to_fixed(), "150.50");
        assert_eq!(draft.installment_number, Some(2));

        for bad in ["", "abc", "0", "-20", "0.00"] {
            assert_eq!(
                validate_payment_form(&plan, &form("812345678", bad)),
                Err(PaymentValidationError::InvalidAmount),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn sub_cent_amounts_are_rounded_before_checking() {
        let plan = installment_plan();

        assert_eq!(
            validate_payment_form(&plan, &form("812345678", "0.004")),
            Err(PaymentValidationError::InvalidAmount)
        );

        let draft = validate_payment_form(&plan, &form("812345678", "0.005")).unwrap();
        assert_eq!(draft.amount.to_fixed(), "0.01");
        let body = serde_json::to_value(draft.to_request(Uuid::nil(), Uuid::nil())).unwrap();
        assert_eq!(body["amount"], json!(0.01));
    }

    #[test]
    fn fully_paid_one_time_cannot_be_submitted() {
        let plan = PayablePlan::OneTime {
            total_due: Money::ZERO,
        };
        assert_eq!(
            validate_payment_form(&plan, &form("812345678", "")),
            Err(PaymentValidationError::InvalidAmount)
        );
    }

    #[test]
    fn draft_builds_request_body() {
        let plan = installment_plan();
        let draft = validate_payment_form(&plan, &form("0812345678", "300")).unwrap();
        let request = draft.to_request(Uuid::nil(), Uuid::max());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "studentId": Uuid::nil(),
                "amount": 300.0,
                "phoneNumber": "243812345678",
                "paymentPlanId": Uuid::max(),
                "installmentNumber": 2,
                "paymentType": "installment",
                "selectedMonth": null,
            })
        );
    }

    #[test]
    fn registration_number_is_trimmed() {
        assert_eq!(
            validate_registration_number("  HP-2026-014 "),
            Some("HP-2026-014".to_string())
        );
        assert_eq!(validate_registration_number("   "), None);
    }
}
