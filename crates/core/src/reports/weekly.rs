//! Weekly company report builder.

use std::collections::BTreeMap;

use buildledger_shared::types::{CompanyId, DateRange, ProjectId};
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use super::types::{ProjectWeek, WeekSummary, WeeklyReport, WeeklyTotals};
use crate::costing::{Category, CostRecord, CostSource, CostingResult, LaborRates, RollupScope};

/// Builds weekly company reports.
pub struct WeeklyReportBuilder;

impl WeeklyReportBuilder {
    /// Groups a company's costs by week and project.
    ///
    /// Records outside `range` or owned by another company are skipped. Weeks
    /// start on Monday; weeks without spend are omitted. Company ownership is
    /// resolved the same way as for rollups.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if an amount
    /// or a total overflows.
    pub fn build<'r, I>(
        company_id: CompanyId,
        range: DateRange,
        records: I,
        rates: &LaborRates<'_>,
    ) -> CostingResult<WeeklyReport>
    where
        I: IntoIterator<Item = &'r CostRecord>,
    {
        let scope = RollupScope::company(company_id).with_range(Some(range));
        let mut cells: BTreeMap<(NaiveDate, ProjectId), WeeklyTotals> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            if !scope.contains_record(record, rates) {
                skipped += 1;
                continue;
            }

            let cell = cells
                .entry((Self::week_start(record.date), record.project_id))
                .or_default();
            *cell = cell.checked_add(Self::totals_for(record, rates)?)?;
        }

        if skipped > 0 {
            debug!(%company_id, skipped, "Records outside the weekly report scope");
        }

        let mut weeks: Vec<WeekSummary> = Vec::new();
        let mut grand_total = WeeklyTotals::default();

        for ((week_start, project_id), totals) in cells {
            grand_total = grand_total.checked_add(totals)?;

            match weeks.last_mut() {
                Some(week) if week.week_start == week_start => {
                    week.totals = week.totals.checked_add(totals)?;
                    week.projects.push(ProjectWeek { project_id, totals });
                }
                _ => weeks.push(WeekSummary {
                    week_start,
                    week_end: week_start
                        .checked_add_days(Days::new(6))
                        .unwrap_or(week_start),
                    projects: vec![ProjectWeek { project_id, totals }],
                    totals,
                }),
            }
        }

        Ok(WeeklyReport {
            company_id,
            range,
            weeks,
            grand_total,
        })
    }

    /// Monday of the week containing `date`.
    #[must_use]
    pub fn week_start(date: NaiveDate) -> NaiveDate {
        let offset = u64::from(date.weekday().num_days_from_monday());
        date.checked_sub_days(Days::new(offset)).unwrap_or(date)
    }

    fn totals_for(record: &CostRecord, rates: &LaborRates<'_>) -> CostingResult<WeeklyTotals> {
        let amount = rates.amount_for(record)?;
        let mut totals = WeeklyTotals {
            total: amount,
            ..WeeklyTotals::default()
        };

        match record.category {
            Category::Labor => {
                totals.labor_cost = amount;
                totals.labor_hours = record.hours_or_zero();
            }
            Category::Subs => totals.subs = amount,
            Category::Materials => totals.materials = amount,
            Category::Other => totals.other = amount,
        }

        if record.source == CostSource::Labor && !record.payment_status.is_paid() {
            totals.unpaid_labor = amount;
        }

        Ok(totals)
    }
}
