//! Month-end balance projection for a candidate deposit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::ANALYSIS_MONTHS;
use crate::schedule::DisbursementSchedule;
use crate::types::Money;

/// Result of replaying the 12-month window with a constant deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceProjection {
    /// Balance at the end of each window month, rounded to cents.
    pub month_end_balances: Vec<Money>,
    /// Lowest month-end balance reached over the window.
    pub minimum_balance: Money,
}

/// Replay the schedule month by month: deposit in, interest credit in,
/// disbursements out. Deterministic; the running balance is carried at full
/// precision and only the reported month-end values are rounded.
pub fn project_balances(
    starting_balance: Money,
    monthly_deposit: Money,
    schedule: &DisbursementSchedule,
    monthly_interest_credit: Money,
) -> BalanceProjection {
    let mut balance = starting_balance;
    let mut month_end_balances = Vec::with_capacity(ANALYSIS_MONTHS);
    for j in 1..=ANALYSIS_MONTHS as u32 {
        balance += monthly_deposit;
        balance += monthly_interest_credit;
        balance -= schedule.get(j);
        month_end_balances.push(balance.round_dp(2));
    }
    let minimum_balance = month_end_balances
        .iter()
        .copied()
        .min()
        .unwrap_or(starting_balance);

    BalanceProjection {
        month_end_balances,
        minimum_balance,
    }
}
