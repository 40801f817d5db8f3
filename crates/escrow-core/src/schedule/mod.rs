//! Disbursement scheduling: recurring charges, frequency expansion, and the
//! 12-slot monthly calendar.

pub mod builder;
pub mod frequency;

pub use builder::{
    build_calendar, build_schedule, expand_charge, ChargeCategory, DisbursementSchedule,
    MortgageInsurance, RecurringCharge, ScheduleInput, ScheduleOutput,
};
pub use frequency::PaymentFrequency;
