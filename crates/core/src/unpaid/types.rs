//! Unpaid tracking types.

use std::collections::BTreeMap;

use buildledger_shared::types::{CompanyId, ProjectId, WorkerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::Totals;

/// Which independent groupings to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpaidGroupings {
    /// Group by worker.
    pub by_worker: bool,
    /// Group by project.
    pub by_project: bool,
    /// Group by company.
    pub by_company: bool,
}

impl UnpaidGroupings {
    /// All three groupings.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            by_worker: true,
            by_project: true,
            by_company: true,
        }
    }

    /// Totals only.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            by_worker: false,
            by_project: false,
            by_company: false,
        }
    }
}

impl Default for UnpaidGroupings {
    fn default() -> Self {
        Self::all()
    }
}

/// Paid and unpaid totals of one set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    /// Settled.
    pub paid: Totals,
    /// Outstanding.
    pub unpaid: Totals,
}

/// Outstanding labor and subcontractor liability.
///
/// The groupings cover the unpaid subset only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpaidReport {
    /// Sum of unpaid amounts.
    pub total_unpaid_amount: Decimal,
    /// Sum of unpaid hours.
    pub total_unpaid_hours: Decimal,
    /// Sum of paid amounts.
    pub total_paid_amount: Decimal,
    /// Sum of paid hours.
    pub total_paid_hours: Decimal,
    /// Unpaid totals per worker.
    pub by_worker: BTreeMap<WorkerId, Totals>,
    /// Unpaid totals per project.
    pub by_project: BTreeMap<ProjectId, Totals>,
    /// Unpaid totals per company.
    pub by_company: BTreeMap<CompanyId, Totals>,
}
