//! Pricing of actual cost records.

use std::collections::HashMap;

use buildledger_shared::types::{CompanyId, LaborRatePolicy, WorkerId};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::{CostingError, CostingResult};
use super::types::{CostRecord, CostSource, RawCostRow, Worker};

/// Worker directory used to price labor at aggregation time.
pub struct LaborRates<'a> {
    workers: HashMap<WorkerId, &'a Worker>,
    policy: LaborRatePolicy,
}

impl<'a> LaborRates<'a> {
    /// Indexes workers by ID.
    #[must_use]
    pub fn new(workers: &'a [Worker], policy: LaborRatePolicy) -> Self {
        Self {
            workers: workers.iter().map(|worker| (worker.id, worker)).collect(),
            policy,
        }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> LaborRatePolicy {
        self.policy
    }

    /// Hourly rate that prices a labor record under the current policy.
    #[must_use]
    pub fn rate_for(&self, record: &CostRecord) -> Option<Decimal> {
        let current = record
            .worker_id
            .and_then(|id| self.workers.get(&id))
            .and_then(|worker| worker.hourly_rate);

        match self.policy {
            LaborRatePolicy::CurrentWorkerRate => current,
            LaborRatePolicy::SnapshotAtEntry => record.rate_snapshot.or(current),
        }
    }

    /// Actual monetary amount of a record.
    ///
    /// Labor is `hours * rate`; a labor record whose rate cannot be resolved
    /// falls back to its stored amount. Everything else uses its stored amount.
    /// A missing amount counts as zero.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::LaborAmountOverflow`] if `hours * rate` does
    /// not fit in a decimal.
    pub fn amount_for(&self, record: &CostRecord) -> CostingResult<Decimal> {
        if record.source != CostSource::Labor {
            return Ok(record.amount.unwrap_or(Decimal::ZERO));
        }

        if let Some(rate) = self.rate_for(record) {
            let hours = record.hours_or_zero();
            return hours
                .checked_mul(rate)
                .ok_or(CostingError::LaborAmountOverflow {
                    record_id: record.id,
                    hours,
                    rate,
                });
        }

        debug!(
            record_id = %record.id,
            worker_id = ?record.worker_id,
            "No hourly rate for labor record, using stored amount"
        );
        Ok(record.amount.unwrap_or(Decimal::ZERO))
    }

    /// Company a record belongs to: the row's own company, else the worker's.
    #[must_use]
    pub fn company_for(&self, record: &CostRecord) -> Option<CompanyId> {
        self.resolve_company(record.company_id, record.worker_id)
    }

    /// Company of a raw row, resolved the same way as [`Self::company_for`].
    #[must_use]
    pub fn company_for_row(&self, row: &RawCostRow) -> Option<CompanyId> {
        self.resolve_company(row.company_id, row.worker_id)
    }

    fn resolve_company(
        &self,
        company_id: Option<CompanyId>,
        worker_id: Option<WorkerId>,
    ) -> Option<CompanyId> {
        company_id.or_else(|| {
            worker_id
                .and_then(|id| self.workers.get(&id))
                .and_then(|worker| worker.company_id)
        })
    }
}
