//! Costing error types.

use buildledger_shared::types::CostRecordId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for rollup arithmetic.
pub type CostingResult<T> = Result<T, CostingError>;

/// Errors raised while pricing or summing actuals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostingError {
    /// `hours * rate` does not fit in a decimal.
    #[error("Labor amount of record {record_id} overflows: {hours} hours at {rate}")]
    LaborAmountOverflow {
        /// The offending record.
        record_id: CostRecordId,
        /// Hours worked.
        hours: Decimal,
        /// Hourly rate applied.
        rate: Decimal,
    },

    /// A running total does not fit in a decimal.
    #[error("Amount overflow while {context}")]
    AmountOverflow {
        /// What was being summed.
        context: &'static str,
    },
}

/// `lhs + rhs`, or an overflow error naming `context`.
pub fn checked_sum(lhs: Decimal, rhs: Decimal, context: &'static str) -> CostingResult<Decimal> {
    lhs.checked_add(rhs)
        .ok_or(CostingError::AmountOverflow { context })
}

/// `lhs - rhs`, or an overflow error naming `context`.
pub fn checked_diff(lhs: Decimal, rhs: Decimal, context: &'static str) -> CostingResult<Decimal> {
    lhs.checked_sub(rhs)
        .ok_or(CostingError::AmountOverflow { context })
}
