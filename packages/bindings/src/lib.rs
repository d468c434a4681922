use napi::Result as NapiResult;
use napi_derive::napi;

use savings_calc_core::interest::{self, SavingsInput};
use savings_calc_core::session::{self, FieldChange, SavingsForm};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// One-shot payout calculation over JSON strings; returns the computation
/// envelope (result, assumptions, warnings, metadata).
#[napi]
pub fn calculate_payout(input_json: String) -> NapiResult<String> {
    let input: SavingsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = interest::calculate_payout_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Apply one form-field edit and recompute.
///
/// Validation failures are part of the returned update, not thrown: the view
/// renders `error` and clears the result, matching per-keystroke behaviour.
#[napi]
pub fn apply_input_change(form_json: String, change_json: String) -> NapiResult<String> {
    let form: SavingsForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let change: FieldChange = serde_json::from_str(&change_json).map_err(to_napi_error)?;
    let update = session::apply_change(&form, change);
    serde_json::to_string(&update).map_err(to_napi_error)
}

/// Default form state for a fresh calculator view.
#[napi]
pub fn default_form() -> NapiResult<String> {
    serde_json::to_string(&SavingsForm::default()).map_err(to_napi_error)
}
