//! 12-month disbursement calendar construction.
//!
//! Folds heterogeneous recurring charges (tax, hazard, flood, HOA, one-offs)
//! into a single 12-slot month-indexed calendar, expanding each charge from
//! its next due date and billing cadence. Mortgage insurance is handled as a
//! continuously-active monthly charge with an optional termination date
//! rather than a due-date-anchored line. All math in `rust_decimal::Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Instant;

use crate::calendar::{add_months, first_of_month, month_index, parse_ymd, ANALYSIS_MONTHS};
use crate::schedule::frequency::PaymentFrequency;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::EscrowResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// What a recurring disbursement pays for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    Tax,
    HazardInsurance,
    FloodInsurance,
    MortgageInsurance,
    HoaDues,
    #[default]
    Other,
}

impl ChargeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tax => "tax",
            Self::HazardInsurance => "hazard insurance",
            Self::FloodInsurance => "flood insurance",
            Self::MortgageInsurance => "mortgage insurance",
            Self::HoaDues => "HOA dues",
            Self::Other => "other",
        }
    }
}

/// A recurring bill paid out of the escrow account.
///
/// `amount` is the amount of a single bill (per occurrence, never an
/// annualized total). Callers adapting upstream records that carry annual
/// totals must divide by the occurrence count before building the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringCharge {
    /// What the disbursement pays for.
    #[serde(default)]
    pub category: ChargeCategory,
    /// Amount of a single bill.
    #[serde(default)]
    pub amount: Money,
    /// Billing cadence.
    #[serde(default)]
    pub frequency: PaymentFrequency,
    /// Next calendar date the bill is due; anchors every occurrence. A
    /// charge without one produces no disbursements, and an unparseable
    /// date degrades to none rather than failing the record.
    #[serde(default, deserialize_with = "lenient_date")]
    pub next_due_date: Option<NaiveDate>,
}

/// Deserialize an optional ISO date, mapping garbage to `None` instead of an
/// error. Upstream servicing extracts routinely carry blank or malformed
/// date fields.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_ymd))
}

/// Active mortgage-insurance premium.
///
/// Unlike a [`RecurringCharge`] there is no due date: the premium is due in
/// every window month from the start until `end_date`'s month (inclusive) or
/// the window end, whichever comes first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInsurance {
    /// Monthly premium amount.
    pub monthly_premium: Money,
    /// Month in which the last premium is due, if the policy terminates
    /// inside the window.
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// The 12-slot calendar
// ---------------------------------------------------------------------------

/// Total disbursements per window month, indexed 1..=12.
///
/// Slot 1 is the analysis start month. All slots start at zero; additions
/// outside the window are clipped, never wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisbursementSchedule {
    months: [Money; ANALYSIS_MONTHS],
}

impl DisbursementSchedule {
    pub fn new() -> Self {
        Self {
            months: [Decimal::ZERO; ANALYSIS_MONTHS],
        }
    }

    /// Build from up to 12 month amounts (slot 1 first). Missing slots stay
    /// zero; extras are ignored.
    pub fn from_amounts(amounts: &[Money]) -> Self {
        let mut schedule = Self::new();
        for (slot, amount) in schedule.months.iter_mut().zip(amounts) {
            *slot = *amount;
        }
        schedule
    }

    /// Add an amount to a 1-based month slot. Out-of-window months are
    /// dropped silently.
    pub fn add(&mut self, month: i64, amount: Money) {
        if (1..=ANALYSIS_MONTHS as i64).contains(&month) {
            self.months[(month - 1) as usize] += amount;
        }
    }

    /// Disbursement total for a 1-based month slot; zero outside the window.
    pub fn get(&self, month: u32) -> Money {
        if (1..=ANALYSIS_MONTHS as u32).contains(&month) {
            self.months[(month - 1) as usize]
        } else {
            Decimal::ZERO
        }
    }

    pub fn amounts(&self) -> &[Money; ANALYSIS_MONTHS] {
        &self.months
    }

    /// Sum across all 12 slots.
    pub fn annual_total(&self) -> Money {
        self.months.iter().copied().sum()
    }

    /// Copy with every slot rounded to cents, for presentation.
    pub fn rounded(&self) -> Self {
        let mut months = self.months;
        for slot in &mut months {
            *slot = slot.round_dp(2);
        }
        Self { months }
    }

    pub fn is_empty(&self) -> bool {
        self.months.iter().all(|m| m.is_zero())
    }
}

impl Default for DisbursementSchedule {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Frequency expansion
// ---------------------------------------------------------------------------

/// Expand a single charge into (month-index, amount) occurrences inside the
/// 12-month window anchored at `window_start`.
///
/// Due-date-anchored cadences place occurrences at the due month plus the
/// cadence offsets. Monthly billing rolls the due date forward: every window
/// month on or after the due month gets a bill, so a due date in the past
/// clamps to the window start. Non-positive amounts and missing due dates
/// produce nothing.
pub fn expand_charge(charge: &RecurringCharge, window_start: NaiveDate) -> Vec<(u32, Money)> {
    let mut occurrences = Vec::new();
    if charge.amount <= Decimal::ZERO {
        return occurrences;
    }
    let Some(due) = charge.next_due_date else {
        return occurrences;
    };
    let window_start = first_of_month(window_start);
    let due_month = first_of_month(due);

    match charge.frequency {
        PaymentFrequency::Monthly => {
            for i in 0..ANALYSIS_MONTHS as u32 {
                if add_months(window_start, i) >= due_month {
                    occurrences.push((i + 1, charge.amount));
                }
            }
        }
        cadence => {
            for &offset in cadence.due_month_offsets() {
                let idx = month_index(window_start, add_months(due_month, offset));
                if (1..=ANALYSIS_MONTHS as i64).contains(&idx) {
                    occurrences.push((idx as u32, charge.amount));
                }
            }
        }
    }
    occurrences
}

// ---------------------------------------------------------------------------
// Calendar building
// ---------------------------------------------------------------------------

/// Fold all charges plus the mortgage-insurance run into one 12-slot
/// calendar, summing amounts when several charges land in the same month.
///
/// Charges that cannot produce occurrences are skipped, not errors; each
/// skip is reported in the returned warnings.
pub fn build_calendar(
    charges: &[RecurringCharge],
    mortgage_insurance: Option<&MortgageInsurance>,
    window_start: NaiveDate,
) -> (DisbursementSchedule, Vec<String>) {
    let mut schedule = DisbursementSchedule::new();
    let mut warnings = Vec::new();
    let window_start = first_of_month(window_start);

    for charge in charges {
        if charge.amount <= Decimal::ZERO {
            warnings.push(format!(
                "Skipped {} charge with non-positive amount {}",
                charge.category.label(),
                charge.amount
            ));
            continue;
        }
        if charge.next_due_date.is_none() {
            warnings.push(format!(
                "Skipped {} charge with no next due date",
                charge.category.label()
            ));
            continue;
        }
        for (month, amount) in expand_charge(charge, window_start) {
            schedule.add(i64::from(month), amount);
        }
    }

    if let Some(mi) = mortgage_insurance {
        apply_mortgage_insurance(&mut schedule, mi, window_start);
    }

    (schedule, warnings)
}

/// Premium is due every month from the window start until the end-date month
/// inclusive; months after it get nothing.
fn apply_mortgage_insurance(
    schedule: &mut DisbursementSchedule,
    mi: &MortgageInsurance,
    window_start: NaiveDate,
) {
    if mi.monthly_premium <= Decimal::ZERO {
        return;
    }
    let cutoff = mi.end_date.map(first_of_month);
    for i in 0..ANALYSIS_MONTHS as u32 {
        let month = add_months(window_start, i);
        if let Some(cutoff) = cutoff {
            if month > cutoff {
                break;
            }
        }
        schedule.add(i64::from(i) + 1, mi.monthly_premium);
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Input for standalone calendar construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// First day of the analysis window; normalized to the first of its
    /// month.
    pub analysis_start: NaiveDate,
    /// Recurring charges to expand into the window.
    #[serde(default)]
    pub charges: Vec<RecurringCharge>,
    /// Active mortgage insurance, if any.
    #[serde(default)]
    pub mortgage_insurance: Option<MortgageInsurance>,
}

/// Output of standalone calendar construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Normalized window start.
    pub analysis_start: NaiveDate,
    /// Total disbursements per window month, rounded to cents.
    pub monthly_schedule: DisbursementSchedule,
    /// Sum across the 12 slots.
    pub annual_total: Money,
}

/// Build the 12-month disbursement calendar without running the deposit
/// analysis.
pub fn build_schedule(input: &ScheduleInput) -> EscrowResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();

    let window_start = first_of_month(input.analysis_start);
    let (schedule, warnings) = build_calendar(
        &input.charges,
        input.mortgage_insurance.as_ref(),
        window_start,
    );

    let output = ScheduleOutput {
        analysis_start: window_start,
        annual_total: schedule.annual_total().round_dp(2),
        monthly_schedule: schedule.rounded(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "12-Month Disbursement Calendar",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
