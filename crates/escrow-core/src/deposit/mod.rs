//! Minimum-deposit solving and balance projection over the 12-month window.

pub mod projection;
pub mod solver;

pub use projection::{project_balances, BalanceProjection};
pub use solver::{required_monthly_deposit, required_monthly_deposit_bisection};
