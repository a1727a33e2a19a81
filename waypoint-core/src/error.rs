//! Validation errors raised at the input boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("not a number: {0:?}")]
    NonNumeric(String),
    #[error("distance must be greater than zero (got {0})")]
    NonPositive(f64),
    #[error("no entries logged yet")]
    EmptyLedger,
    #[error("invalid milestone table: {0}")]
    InvalidMilestoneTable(String),
    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}
