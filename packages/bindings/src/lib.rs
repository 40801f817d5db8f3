use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Escrow analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_escrow(input_json: String) -> NapiResult<String> {
    let input: escrow_core::analysis::EscrowAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = escrow_core::analysis::analyze_escrow(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: escrow_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = escrow_core::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Standalone deposit solver
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DepositRequest {
    starting_balance: Decimal,
    schedule: Vec<Decimal>,
    #[serde(default)]
    monthly_interest_credit: Decimal,
    #[serde(default)]
    allowed_cushion: Decimal,
}

#[napi]
pub fn required_deposit(input_json: String) -> NapiResult<String> {
    let request: DepositRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = escrow_core::schedule::DisbursementSchedule::from_amounts(&request.schedule);
    let deposit = escrow_core::deposit::required_monthly_deposit(
        request.starting_balance,
        &schedule,
        request.monthly_interest_credit,
        request.allowed_cushion,
    );
    let projection = escrow_core::deposit::project_balances(
        request.starting_balance,
        deposit,
        &schedule,
        request.monthly_interest_credit,
    );
    serde_json::to_string(&serde_json::json!({
        "required_monthly_deposit": deposit.to_string(),
        "month_end_balances": projection
            .month_end_balances
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<String>>(),
        "minimum_projected_balance": projection.minimum_balance.to_string(),
    }))
    .map_err(to_napi_error)
}
