//! Surplus disposition policy.
//!
//! The analysis never executes a refund or collection; it only classifies
//! what the servicer would normally do with a computed surplus and passes
//! the caller's status flags through untouched for the manual decision.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Money;

/// RESPA surplus refund threshold: surpluses below this are credited against
/// upcoming payments instead of refunded.
pub const REFUND_THRESHOLD: Decimal = dec!(50);

/// Servicing status supplied by the caller.
///
/// Only the typed fields gate the surplus classification. Everything else
/// rides along in `extra` and is never inspected by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusFlags {
    /// Outstanding delinquent tax amount; any positive value disqualifies a
    /// refund.
    pub delinquent_taxes: Money,
    pub bankruptcy: bool,
    pub foreclosure: bool,
    pub service_release_pending: bool,
    /// Whether the borrower is current on payments.
    pub loan_current: bool,
    /// Escrow has been waived; the account is not actionable.
    pub escrow_waived: bool,
    /// Loan paid in full; the account is not actionable.
    pub paid_in_full: bool,
    /// Opaque pass-through bag for fields the math never touches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self {
            delinquent_taxes: Decimal::ZERO,
            bankruptcy: false,
            foreclosure: false,
            service_release_pending: false,
            loan_current: true,
            escrow_waived: false,
            paid_in_full: false,
            extra: Map::new(),
        }
    }
}

impl StatusFlags {
    /// Conditions that disqualify a cash refund, leaving the surplus to be
    /// credited instead.
    fn disqualifies_refund(&self) -> bool {
        self.delinquent_taxes > Decimal::ZERO
            || self.bankruptcy
            || self.foreclosure
            || self.service_release_pending
            || !self.loan_current
    }

    /// There is no active escrow account to adjust.
    fn account_inactive(&self) -> bool {
        self.escrow_waived || self.paid_in_full
    }
}

/// Advisory disposition for a computed surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    Refund,
    Credit,
    Hold,
}

/// Classify what to do with a computed surplus.
///
/// Inactive accounts hold; surpluses at or above [`REFUND_THRESHOLD`] on a
/// clean account refund; everything else is credited against upcoming
/// payments. Advisory only, never enforced.
pub fn classify_surplus(surplus: Money, status: &StatusFlags) -> RecommendedAction {
    if status.account_inactive() {
        return RecommendedAction::Hold;
    }
    if surplus >= REFUND_THRESHOLD && !status.disqualifies_refund() {
        return RecommendedAction::Refund;
    }
    RecommendedAction::Credit
}
