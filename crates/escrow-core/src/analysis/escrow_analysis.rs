//! 12-month escrow account analysis.
//!
//! Ties the pieces together: builds the disbursement calendar, caps the
//! cushion at the regulatory ceiling of one sixth of annual disbursements,
//! solves for the minimum monthly deposit, replays the window to get the
//! balance trajectory, and derives surplus/shortage plus the advisory
//! surplus disposition. All math in `rust_decimal::Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::policy::{classify_surplus, RecommendedAction, StatusFlags};
use crate::calendar::first_of_month;
use crate::deposit::{project_balances, required_monthly_deposit};
use crate::error::EscrowError;
use crate::schedule::{build_calendar, DisbursementSchedule, MortgageInsurance, RecurringCharge};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::EscrowResult;

/// Residual shortage beyond this is a solver/simulator disagreement, not
/// rounding noise.
const SHORTAGE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for a full escrow account analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowAnalysisInput {
    /// Loan identifier, echoed into the output.
    #[serde(default)]
    pub loan_id: Option<String>,
    /// Escrow balance at the start of the window. May be negative.
    #[serde(default)]
    pub starting_balance: Money,
    /// First day of the analysis window; normalized to the first of its
    /// month.
    pub analysis_start: NaiveDate,
    /// Interest credited to the account every month. Whether state law
    /// mandates the credit is the caller's decision; if present it is
    /// applied unconditionally.
    #[serde(default)]
    pub monthly_interest_credit: Money,
    /// Cushion policy ceiling in dollars. Capped at one sixth of annual
    /// disbursements; omitted means the regulatory cap itself applies.
    #[serde(default)]
    pub cushion_ceiling: Option<Money>,
    /// Recurring charges to expand into the window.
    #[serde(default)]
    pub charges: Vec<RecurringCharge>,
    /// Active mortgage insurance, if any.
    #[serde(default)]
    pub mortgage_insurance: Option<MortgageInsurance>,
    /// Servicing status; gates the surplus disposition and passes through.
    #[serde(default)]
    pub status: StatusFlags,
}

/// Output of a full escrow account analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowAnalysisOutput {
    /// Loan identifier from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<String>,
    /// Normalized window start.
    pub analysis_start: NaiveDate,
    /// Sum of all scheduled disbursements.
    pub annual_disbursements: Money,
    /// Cushion actually allowed after the regulatory cap.
    pub allowed_cushion: Money,
    /// Smallest constant monthly deposit keeping the balance above the
    /// negative cushion, rounded up to the cent.
    pub required_monthly_deposit: Money,
    /// Total disbursements per window month, rounded to cents.
    pub monthly_schedule: DisbursementSchedule,
    /// Projected balance at the end of each window month.
    pub month_end_balances: Vec<Money>,
    /// Lowest projected month-end balance.
    pub minimum_projected_balance: Money,
    /// How far the minimum balance sits above the cushion floor.
    pub surplus: Money,
    /// How far the minimum balance dips below the cushion floor. Zero by
    /// construction of the solver.
    pub shortage: Money,
    /// Interest credit applied each month.
    pub monthly_interest_credit: Money,
    /// Advisory disposition for the surplus.
    pub recommendation: RecommendedAction,
    /// Caller-supplied status flags, passed through for the manual
    /// refund/collection decision.
    pub policy_flags: StatusFlags,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full 12-month escrow account analysis.
///
/// The only hard failure beyond input validation is an invariant violation:
/// the solver guarantees a zero shortage, so a residual shortage above one
/// cent in the replay means the solver and simulator disagree.
pub fn analyze_escrow(
    input: &EscrowAnalysisInput,
) -> EscrowResult<ComputationOutput<EscrowAnalysisOutput>> {
    let start = Instant::now();
    validate_input(input)?;

    let window_start = first_of_month(input.analysis_start);
    let (schedule, mut warnings) = build_calendar(
        &input.charges,
        input.mortgage_insurance.as_ref(),
        window_start,
    );

    let annual_disbursements = schedule.annual_total().round_dp(2);

    // RESPA ceiling: one sixth of annual disbursements, regardless of the
    // policy input.
    let regulatory_cap = (annual_disbursements / dec!(6)).round_dp(2);
    let allowed_cushion = match input.cushion_ceiling {
        Some(ceiling) if ceiling > regulatory_cap => {
            warnings.push(format!(
                "Cushion ceiling {} exceeds one sixth of annual disbursements; capped at {}",
                ceiling, regulatory_cap
            ));
            regulatory_cap
        }
        Some(ceiling) => ceiling.round_dp(2),
        None => regulatory_cap,
    };

    let required_deposit = required_monthly_deposit(
        input.starting_balance,
        &schedule,
        input.monthly_interest_credit,
        allowed_cushion,
    );

    let projection = project_balances(
        input.starting_balance,
        required_deposit,
        &schedule,
        input.monthly_interest_credit,
    );

    let headroom = projection.minimum_balance + allowed_cushion;
    let surplus = headroom.max(Decimal::ZERO).round_dp(2);
    let shortage = (-headroom).max(Decimal::ZERO).round_dp(2);

    if shortage > SHORTAGE_EPSILON {
        return Err(EscrowError::InvariantViolation {
            context: "escrow analysis".into(),
            shortfall: shortage,
        });
    }

    let recommendation = classify_surplus(surplus, &input.status);

    let output = EscrowAnalysisOutput {
        loan_id: input.loan_id.clone(),
        analysis_start: window_start,
        annual_disbursements,
        allowed_cushion,
        required_monthly_deposit: required_deposit,
        monthly_schedule: schedule.rounded(),
        month_end_balances: projection.month_end_balances,
        minimum_projected_balance: projection.minimum_balance,
        surplus,
        shortage,
        monthly_interest_credit: input.monthly_interest_credit.round_dp(2),
        recommendation,
        policy_flags: input.status.clone(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "RESPA 12-Month Escrow Account Analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &EscrowAnalysisInput) -> EscrowResult<()> {
    if let Some(ceiling) = input.cushion_ceiling {
        if ceiling < Decimal::ZERO {
            return Err(EscrowError::InvalidInput {
                field: "cushion_ceiling".into(),
                reason: "Cushion ceiling cannot be negative.".into(),
            });
        }
    }
    if input.monthly_interest_credit < Decimal::ZERO {
        return Err(EscrowError::InvalidInput {
            field: "monthly_interest_credit".into(),
            reason: "Monthly interest credit cannot be negative.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
