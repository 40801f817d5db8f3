pub mod calendar;
pub mod error;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "deposit")]
pub mod deposit;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::EscrowError;
pub use types::*;

/// Standard result type for all escrow operations
pub type EscrowResult<T> = Result<T, EscrowError>;
