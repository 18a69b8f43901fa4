//! Budget variance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Variance status classification for costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Under budget.
    Favorable,
    /// Over budget.
    Unfavorable,
    /// Exactly on budget.
    OnBudget,
}

impl VarianceStatus {
    /// Classifies a remaining budget (`budget - actual`).
    #[must_use]
    pub fn from_remaining(remaining: Decimal) -> Self {
        match remaining.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => Self::Favorable,
            std::cmp::Ordering::Less => Self::Unfavorable,
            std::cmp::Ordering::Equal => Self::OnBudget,
        }
    }
}

/// Variance calculation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// Remaining budget (`budgeted - actual`).
    pub variance: Decimal,
    /// Variance as a percentage of budget; zero when nothing was budgeted.
    pub variance_percent: Decimal,
    /// Utilization percentage, absent when nothing was budgeted.
    pub utilization_percent: Option<Decimal>,
    /// Variance status.
    pub status: VarianceStatus,
}

/// `actual / budget * 100` rounded to 2 places, `None` unless `budget > 0`.
#[must_use]
pub fn percent_used(budget: Decimal, actual: Decimal) -> Option<Decimal> {
    if budget <= Decimal::ZERO {
        return None;
    }
    actual
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp(2))
}
