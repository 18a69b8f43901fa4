//! Report data types.

use buildledger_shared::types::{CompanyId, DateRange, ProjectId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::CostingResult;
use crate::costing::error::checked_sum;

/// Spend totals for one cell of the weekly report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    /// Labor hours.
    pub labor_hours: Decimal,
    /// Labor cost.
    pub labor_cost: Decimal,
    /// Subcontractor cost.
    pub subs: Decimal,
    /// Materials cost.
    pub materials: Decimal,
    /// Other cost.
    pub other: Decimal,
    /// Sum of all categories.
    pub total: Decimal,
    /// Labor cost not yet paid.
    pub unpaid_labor: Decimal,
}

impl WeeklyTotals {
    /// Field-wise sum.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if any field
    /// overflows.
    pub fn checked_add(self, rhs: Self) -> CostingResult<Self> {
        const CONTEXT: &str = "summing weekly totals";
        Ok(Self {
            labor_hours: checked_sum(self.labor_hours, rhs.labor_hours, CONTEXT)?,
            labor_cost: checked_sum(self.labor_cost, rhs.labor_cost, CONTEXT)?,
            subs: checked_sum(self.subs, rhs.subs, CONTEXT)?,
            materials: checked_sum(self.materials, rhs.materials, CONTEXT)?,
            other: checked_sum(self.other, rhs.other, CONTEXT)?,
            total: checked_sum(self.total, rhs.total, CONTEXT)?,
            unpaid_labor: checked_sum(self.unpaid_labor, rhs.unpaid_labor, CONTEXT)?,
        })
    }
}

/// One project's spend in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWeek {
    /// Project.
    pub project_id: ProjectId,
    /// Totals.
    pub totals: WeeklyTotals,
}

/// One Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Monday.
    pub week_start: NaiveDate,
    /// Sunday.
    pub week_end: NaiveDate,
    /// Projects with spend this week, by project ID.
    pub projects: Vec<ProjectWeek>,
    /// Totals across the week's projects.
    pub totals: WeeklyTotals,
}

/// Weekly company cost report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Company.
    pub company_id: CompanyId,
    /// Reporting period.
    pub range: DateRange,
    /// Weeks with spend, oldest first.
    pub weeks: Vec<WeekSummary>,
    /// Totals across all weeks.
    pub grand_total: WeeklyTotals,
}
