//! Minimum constant monthly deposit under a balance-floor constraint.
//!
//! Given a starting balance, the 12-slot disbursement schedule, an optional
//! monthly interest credit, and the allowed cushion, find the smallest
//! constant monthly deposit `m >= 0` such that for every month `j`:
//!
//! ```text
//! S0 + j*m + j*credit - cumulative_disbursed(j) >= -cushion
//! ```
//!
//! The constraint is monotone-linear in `m` per month, so the closed form
//! `m = max(0, max_j (cum(j) - S0 - j*credit - cushion) / j)` is exact. A
//! bisection solver over the same constraint is provided as the alternative
//! strategy; both round the result up to the cent. All math in
//! `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::calendar::ANALYSIS_MONTHS;
use crate::schedule::DisbursementSchedule;
use crate::types::Money;

/// Bisection narrows the deposit to within a tenth of a cent before the
/// final round-up.
const BISECTION_TOLERANCE: Decimal = dec!(0.001);

/// Smallest constant monthly deposit keeping every month-end balance at or
/// above `-allowed_cushion`. Closed-form worst-case-ratio computation.
///
/// Never fails; an all-zero schedule (or a starting balance already covering
/// the window) yields zero.
pub fn required_monthly_deposit(
    starting_balance: Money,
    schedule: &DisbursementSchedule,
    monthly_interest_credit: Money,
    allowed_cushion: Money,
) -> Money {
    let mut cumulative = Decimal::ZERO;
    let mut worst = Decimal::ZERO;
    for j in 1..=ANALYSIS_MONTHS as u32 {
        cumulative += schedule.get(j);
        let months = Decimal::from(j);
        let needed = (cumulative
            - starting_balance
            - months * monthly_interest_credit
            - allowed_cushion)
            / months;
        if needed > worst {
            worst = needed;
        }
    }
    round_up_to_cent(worst)
}

/// Bisection variant of [`required_monthly_deposit`].
///
/// Brackets the answer by doubling an upper bound until the floor constraint
/// holds, then halves the interval to within [`BISECTION_TOLERANCE`] and
/// rounds the feasible endpoint up to the cent. May land one cent above the
/// closed form when the exact answer sits on a cent boundary; never below.
pub fn required_monthly_deposit_bisection(
    starting_balance: Money,
    schedule: &DisbursementSchedule,
    monthly_interest_credit: Money,
    allowed_cushion: Money,
) -> Money {
    if meets_floor(
        Decimal::ZERO,
        starting_balance,
        schedule,
        monthly_interest_credit,
        allowed_cushion,
    ) {
        return Decimal::ZERO;
    }

    let mut lo = Decimal::ZERO;
    let mut hi = schedule.annual_total().max(Decimal::ONE);
    while !meets_floor(
        hi,
        starting_balance,
        schedule,
        monthly_interest_credit,
        allowed_cushion,
    ) {
        hi *= dec!(2);
    }

    while hi - lo > BISECTION_TOLERANCE {
        let mid = (lo + hi) / dec!(2);
        if meets_floor(
            mid,
            starting_balance,
            schedule,
            monthly_interest_credit,
            allowed_cushion,
        ) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    round_up_to_cent(hi)
}

/// Replay the window with a candidate deposit and check the balance never
/// drops below `-cushion`.
fn meets_floor(
    deposit: Money,
    starting_balance: Money,
    schedule: &DisbursementSchedule,
    monthly_interest_credit: Money,
    allowed_cushion: Money,
) -> bool {
    let floor = -allowed_cushion;
    let mut balance = starting_balance;
    for j in 1..=ANALYSIS_MONTHS as u32 {
        balance += deposit + monthly_interest_credit - schedule.get(j);
        if balance < floor {
            return false;
        }
    }
    true
}

/// Round a deposit up to the next cent. Rounding down could let the
/// projected balance dip a fraction of a cent below the cushion floor.
fn round_up_to_cent(amount: Decimal) -> Money {
    amount
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule_with(slots: &[(u32, Decimal)]) -> DisbursementSchedule {
        let mut s = DisbursementSchedule::new();
        for &(month, amount) in slots {
            s.add(i64::from(month), amount);
        }
        s
    }

    #[test]
    fn test_zero_schedule_needs_zero_deposit() {
        let s = DisbursementSchedule::new();
        let m = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(m, Decimal::ZERO);
    }

    #[test]
    fn test_annual_bill_month_six() {
        // 6m - 1200 >= -200  =>  m >= 166.666..., rounded up to 166.67.
        let s = schedule_with(&[(6, dec!(1200))]);
        let m = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, dec!(200));
        assert_eq!(m, dec!(166.67));
    }

    #[test]
    fn test_deposit_rounds_up_never_down() {
        // m >= 100/3 = 33.333... => 33.34, not 33.33.
        let s = schedule_with(&[(3, dec!(100))]);
        let m = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(m, dec!(33.34));
    }

    #[test]
    fn test_exact_cent_answer_not_inflated() {
        let s = schedule_with(&[(1, dec!(100))]);
        let m = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(m, dec!(100.00));
    }

    #[test]
    fn test_starting_balance_reduces_deposit() {
        let s = schedule_with(&[(6, dec!(1200))]);
        let with_balance = required_monthly_deposit(dec!(600), &s, Decimal::ZERO, dec!(200));
        let without = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, dec!(200));
        assert!(with_balance < without);
        // (1200 - 600 - 200) / 6 = 66.666... => 66.67
        assert_eq!(with_balance, dec!(66.67));
    }

    #[test]
    fn test_interest_credit_reduces_deposit() {
        let s = schedule_with(&[(6, dec!(1200))]);
        let with_credit = required_monthly_deposit(Decimal::ZERO, &s, dec!(5), dec!(200));
        let without = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, dec!(200));
        assert!(with_credit < without);
        // (1200 - 6*5 - 200) / 6 = 161.666... => 161.67
        assert_eq!(with_credit, dec!(161.67));
    }

    #[test]
    fn test_large_starting_balance_needs_nothing() {
        let s = schedule_with(&[(6, dec!(1200))]);
        let m = required_monthly_deposit(dec!(5000), &s, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(m, Decimal::ZERO);
    }

    #[test]
    fn test_worst_month_governs() {
        // Month 1 is the binding constraint: 600 due immediately.
        let s = schedule_with(&[(1, dec!(600)), (7, dec!(600))]);
        let m = required_monthly_deposit(Decimal::ZERO, &s, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(m, dec!(600.00));
    }

    #[test]
    fn test_floor_holds_at_solution() {
        let s = schedule_with(&[(2, dec!(450)), (5, dec!(900)), (11, dec!(300))]);
        let cushion = dec!(125);
        let m = required_monthly_deposit(dec!(80), &s, dec!(2.50), cushion);
        assert!(meets_floor(m, dec!(80), &s, dec!(2.50), cushion));
        // One cent less must violate the floor, otherwise m was not minimal.
        if m > Decimal::ZERO {
            assert!(!meets_floor(m - dec!(0.01), dec!(80), &s, dec!(2.50), cushion));
        }
    }

    // -- Bisection agreement -------------------------------------------------

    #[test]
    fn test_bisection_zero_schedule() {
        let s = DisbursementSchedule::new();
        let m = required_monthly_deposit_bisection(Decimal::ZERO, &s, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(m, Decimal::ZERO);
    }

    #[test]
    fn test_bisection_agrees_with_closed_form() {
        let cases: Vec<(Decimal, DisbursementSchedule, Decimal, Decimal)> = vec![
            (Decimal::ZERO, schedule_with(&[(6, dec!(1200))]), Decimal::ZERO, dec!(200)),
            (dec!(1200), schedule_with(&[(5, dec!(3600)), (11, dec!(1800))]), Decimal::ZERO, dec!(500)),
            (dec!(-250), schedule_with(&[(1, dec!(75)), (4, dec!(940.50))]), dec!(1.25), Decimal::ZERO),
            (dec!(80), schedule_with(&[(2, dec!(450)), (5, dec!(900)), (11, dec!(300))]), dec!(2.50), dec!(125)),
        ];
        for (s0, schedule, credit, cushion) in cases {
            let closed = required_monthly_deposit(s0, &schedule, credit, cushion);
            let bisected = required_monthly_deposit_bisection(s0, &schedule, credit, cushion);
            assert!(
                bisected >= closed && bisected - closed <= dec!(0.01),
                "bisection {} should sit within one cent above closed form {}",
                bisected,
                closed
            );
            assert!(meets_floor(bisected, s0, &schedule, credit, cushion));
        }
    }
}
