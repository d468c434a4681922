//! Reactive form transition: one field edit in, new state plus a fresh
//! result (or the first validation message) out. Pure and synchronous, so a
//! UI can call it from any event loop without framework assumptions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::interest::{calculate_payout, PeriodUnit, SavingsBreakdown, SavingsInput};
use crate::types::{Money, Percent};

/// Form state mirrored by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsForm {
    pub period: Decimal,
    pub period_unit: PeriodUnit,
    pub payment_amount: Money,
    pub annual_rate: Percent,
}

impl SavingsForm {
    pub fn to_input(&self) -> SavingsInput {
        SavingsInput {
            period: self.period,
            period_unit: self.period_unit,
            payment_amount: self.payment_amount,
            annual_rate: self.annual_rate,
        }
    }
}

/// A single edited field, as posted by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldChange {
    Period(Decimal),
    PeriodUnit(PeriodUnit),
    PaymentAmount(Money),
    AnnualRate(Percent),
}

/// Outcome of one input change. Exactly one of `result`/`error` is set: a
/// validation failure clears the previous result rather than keeping a stale
/// one on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormUpdate {
    pub form: SavingsForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SavingsBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Apply one field edit and recompute. The previous form is untouched.
pub fn apply_change(form: &SavingsForm, change: FieldChange) -> FormUpdate {
    let mut next = form.clone();
    match change {
        FieldChange::Period(v) => next.period = v,
        FieldChange::PeriodUnit(u) => next.period_unit = u,
        FieldChange::PaymentAmount(v) => next.payment_amount = v,
        FieldChange::AnnualRate(v) => next.annual_rate = v,
    }

    match calculate_payout(&next.to_input()) {
        Ok(breakdown) => FormUpdate {
            form: next,
            result: Some(breakdown),
            error: None,
        },
        Err(e) => FormUpdate {
            form: next,
            result: None,
            error: Some(e.to_string()),
        },
    }
}
