//! Full 12-month escrow account analysis: calendar, cushion cap, deposit
//! solve, balance projection, and surplus disposition.

pub mod escrow_analysis;
pub mod policy;

pub use escrow_analysis::{analyze_escrow, EscrowAnalysisInput, EscrowAnalysisOutput};
pub use policy::{classify_surplus, RecommendedAction, StatusFlags, REFUND_THRESHOLD};
