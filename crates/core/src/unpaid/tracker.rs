//! Unpaid/outstanding tracker.

use tracing::debug;

use super::types::{PaymentSplit, UnpaidGroupings, UnpaidReport};
use crate::costing::error::checked_sum;
use crate::costing::{CostRecord, CostSource, CostingResult, LaborRates};

/// Partitions payable actuals by payment status.
///
/// Read-only: payment status is owned by the forms that record payments.
pub struct UnpaidTracker;

impl UnpaidTracker {
    /// Paid/unpaid split over records of one source.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if an amount
    /// or a total overflows.
    pub fn split<'r, I>(
        records: I,
        source: CostSource,
        rates: &LaborRates<'_>,
    ) -> CostingResult<PaymentSplit>
    where
        I: IntoIterator<Item = &'r CostRecord>,
    {
        let mut split = PaymentSplit::default();
        for record in records.into_iter().filter(|r| r.source == source) {
            let bucket = if record.payment_status.is_paid() {
                &mut split.paid
            } else {
                &mut split.unpaid
            };
            bucket.add(rates.amount_for(record)?, record.hours_or_zero())?;
        }
        Ok(split)
    }

    /// Tracks unpaid labor and subcontractor costs.
    ///
    /// Materials and miscellaneous costs carry no payment status and are ignored.
    /// Records lacking a grouping key (no worker, no resolvable company) count
    /// toward the totals but not toward that grouping.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if an amount
    /// or a total overflows.
    pub fn track<'r, I>(
        records: I,
        rates: &LaborRates<'_>,
        groupings: UnpaidGroupings,
    ) -> CostingResult<UnpaidReport>
    where
        I: IntoIterator<Item = &'r CostRecord>,
    {
        let mut report = UnpaidReport::default();
        let mut skipped = 0usize;

        for record in records.into_iter().filter(|r| r.source.is_payable()) {
            let amount = rates.amount_for(record)?;
            let hours = record.hours_or_zero();

            if record.payment_status.is_paid() {
                report.total_paid_amount =
                    checked_sum(report.total_paid_amount, amount, "summing paid amounts")?;
                report.total_paid_hours =
                    checked_sum(report.total_paid_hours, hours, "summing paid hours")?;
                continue;
            }

            report.total_unpaid_amount =
                checked_sum(report.total_unpaid_amount, amount, "summing unpaid amounts")?;
            report.total_unpaid_hours =
                checked_sum(report.total_unpaid_hours, hours, "summing unpaid hours")?;

            if groupings.by_worker {
                if let Some(worker_id) = record.worker_id {
                    report.by_worker.entry(worker_id).or_default().add(amount, hours)?;
                }
            }
            if groupings.by_project {
                report
                    .by_project
                    .entry(record.project_id)
                    .or_default()
                    .add(amount, hours)?;
            }
            if groupings.by_company {
                match rates.company_for(record) {
                    Some(company_id) => {
                        report.by_company.entry(company_id).or_default().add(amount, hours)?;
                    }
                    None => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "Unpaid records without a company left out of company grouping");
        }

        Ok(report)
    }
}
