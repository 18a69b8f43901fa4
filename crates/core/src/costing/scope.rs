//! Rollup scope parameters.
//!
//! A scope is passed explicitly into every rollup; there is no ambient filter
//! state.

use buildledger_shared::types::{CompanyId, DateRange, DateRangeError, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rates::LaborRates;
use super::types::{CostRecord, RawCostRow};

/// Which rows a rollup covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupScope {
    /// Restrict to one project.
    pub project_id: Option<ProjectId>,
    /// Restrict to one company.
    pub company_id: Option<CompanyId>,
    /// Restrict to an inclusive date range.
    pub range: Option<DateRange>,
}

impl RollupScope {
    /// Everything in one project.
    #[must_use]
    pub fn project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    /// Everything in one company.
    #[must_use]
    pub fn company(company_id: CompanyId) -> Self {
        Self {
            company_id: Some(company_id),
            ..Self::default()
        }
    }

    /// Narrows the scope to `[start, end]`.
    pub fn between(self, start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        Ok(self.with_range(Some(DateRange::new(start, end)?)))
    }

    /// Replaces the date range.
    #[must_use]
    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.range = range;
        self
    }

    /// Returns true if the row falls inside the scope.
    ///
    /// A row's company is its own, else its worker's. Rows whose company cannot
    /// be resolved are kept under a company scope: the caller fetched them for
    /// that company.
    #[must_use]
    pub fn contains(&self, row: &RawCostRow, rates: &LaborRates<'_>) -> bool {
        self.admits(row.project_id, rates.company_for_row(row), row.date)
    }

    /// Same test as [`Self::contains`] for an already classified record.
    #[must_use]
    pub fn contains_record(&self, record: &CostRecord, rates: &LaborRates<'_>) -> bool {
        self.admits(record.project_id, rates.company_for(record), record.date)
    }

    /// Keeps the rows inside the scope.
    #[must_use]
    pub fn filter<'r>(&self, rows: &'r [RawCostRow], rates: &LaborRates<'_>) -> Vec<&'r RawCostRow> {
        rows.iter().filter(|row| self.contains(row, rates)).collect()
    }

    fn admits(&self, project_id: ProjectId, company_id: Option<CompanyId>, date: NaiveDate) -> bool {
        if self.project_id.is_some_and(|id| id != project_id) {
            return false;
        }
        if let (Some(scope), Some(own)) = (self.company_id, company_id) {
            if scope != own {
                return false;
            }
        }
        self.range.is_none_or(|range| range.contains(date))
    }
}
