//! Actual-cost aggregation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::CostingResult;
use super::rates::LaborRates;
use super::types::{ActualKey, Category, CostRecord, Totals};

/// Aggregated actuals for one scope.
///
/// Every record contributes to exactly one `by_key` entry and exactly one
/// `by_category` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actuals {
    /// Totals per cost code, or per category for unassigned costs.
    pub by_key: BTreeMap<ActualKey, Totals>,
    /// Totals per canonical category; all four categories are always present.
    pub by_category: BTreeMap<Category, Totals>,
    /// Grand total.
    pub total: Totals,
    /// Number of records aggregated.
    pub record_count: usize,
}

impl Default for Actuals {
    fn default() -> Self {
        Self {
            by_key: BTreeMap::new(),
            by_category: Category::ALL
                .into_iter()
                .map(|category| (category, Totals::default()))
                .collect(),
            total: Totals::default(),
            record_count: 0,
        }
    }
}

impl Actuals {
    /// Totals for one category.
    #[must_use]
    pub fn category(&self, category: Category) -> Totals {
        self.by_category.get(&category).copied().unwrap_or_default()
    }
}

/// Sums actual amounts and hours.
pub struct CostAggregator;

impl CostAggregator {
    /// Ledger key of a classified record.
    #[must_use]
    pub fn key_for(record: &CostRecord) -> ActualKey {
        record
            .cost_code_id
            .map_or(ActualKey::Unassigned(record.category), ActualKey::CostCode)
    }

    /// Aggregates records in a single pass.
    ///
    /// Labor is priced through `rates` at call time. No rounding is applied.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](super::CostingError) if a labor amount or a
    /// running total overflows.
    pub fn aggregate<'r, I>(records: I, rates: &LaborRates<'_>) -> CostingResult<Actuals>
    where
        I: IntoIterator<Item = &'r CostRecord>,
    {
        let mut actuals = Actuals::default();

        for record in records {
            let amount = rates.amount_for(record)?;
            let hours = record.hours_or_zero();

            actuals.total.add(amount, hours)?;
            actuals
                .by_key
                .entry(Self::key_for(record))
                .or_default()
                .add(amount, hours)?;
            actuals
                .by_category
                .entry(record.category)
                .or_default()
                .add(amount, hours)?;
            actuals.record_count += 1;
        }

        Ok(actuals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::CostingError;
    use crate::costing::types::{Classification, CostSource, RawCostRow, Worker};
    use buildledger_shared::types::{CostCodeId, LaborRatePolicy, ProjectId, WorkerId};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(
        source: CostSource,
        category: Category,
        cost_code_id: Option<CostCodeId>,
        amount: Option<Decimal>,
        hours: Option<Decimal>,
        worker_id: Option<WorkerId>,
    ) -> CostRecord {
        let mut row = RawCostRow::new(
            source,
            ProjectId::new(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        row.amount = amount;
        row.hours = hours;
        row.worker_id = worker_id;
        CostRecord::from_row(
            &row,
            Classification {
                category,
                cost_code_id,
            },
        )
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let rates = LaborRates::new(&[], LaborRatePolicy::CurrentWorkerRate);
        let actuals = CostAggregator::aggregate(std::iter::empty(), &rates).unwrap();

        assert!(actuals.by_key.is_empty());
        assert_eq!(actuals.by_category.len(), 4);
        assert!(actuals.by_category.values().all(|t| *t == Totals::default()));
        assert_eq!(actuals.total, Totals::default());
        assert_eq!(actuals.record_count, 0);
    }

    #[test]
    fn test_sums_by_code_and_category() {
        let workers = vec![Worker {
            id: WorkerId::new(),
            name: "W".to_string(),
            company_id: None,
            hourly_rate: Some(dec!(25)),
        }];
        let rates = LaborRates::new(&workers, LaborRatePolicy::CurrentWorkerRate);
        let code = CostCodeId::new();

        let records = vec![
            record(
                CostSource::Labor,
                Category::Labor,
                Some(code),
                None,
                Some(dec!(4)),
                Some(workers[0].id),
            ),
            record(
                CostSource::Labor,
                Category::Labor,
                Some(code),
                None,
                Some(dec!(2.5)),
                Some(workers[0].id),
            ),
            record(
                CostSource::Material,
                Category::Materials,
                None,
                Some(dec!(300.10)),
                None,
                None,
            ),
        ];

        let actuals = CostAggregator::aggregate(&records, &rates).unwrap();

        assert_eq!(
            actuals.by_key[&ActualKey::CostCode(code)],
            Totals::new(dec!(162.5), dec!(6.5))
        );
        assert_eq!(
            actuals.by_key[&ActualKey::Unassigned(Category::Materials)],
            Totals::new(dec!(300.10), Decimal::ZERO)
        );
        assert_eq!(
            actuals.category(Category::Labor),
            Totals::new(dec!(162.5), dec!(6.5))
        );
        assert_eq!(actuals.total.amount, dec!(462.60));
        assert_eq!(actuals.record_count, 3);
    }

    #[test]
    fn test_decimal_accumulation_has_no_drift() {
        let rates = LaborRates::new(&[], LaborRatePolicy::CurrentWorkerRate);
        let records: Vec<_> = (0..10)
            .map(|_| {
                record(
                    CostSource::Misc,
                    Category::Other,
                    None,
                    Some(dec!(0.1)),
                    None,
                    None,
                )
            })
            .collect();

        let actuals = CostAggregator::aggregate(&records, &rates).unwrap();

        assert_eq!(actuals.total.amount, dec!(1.0));
    }

    #[test]
    fn test_huge_labor_hours_are_rejected() {
        let workers = vec![Worker {
            id: WorkerId::new(),
            name: "W".to_string(),
            company_id: None,
            hourly_rate: Some(dec!(2)),
        }];
        let rates = LaborRates::new(&workers, LaborRatePolicy::CurrentWorkerRate);
        let records = vec![record(
            CostSource::Labor,
            Category::Labor,
            None,
            None,
            Some(Decimal::MAX),
            Some(workers[0].id),
        )];

        let result = CostAggregator::aggregate(&records, &rates);

        assert!(matches!(
            result,
            Err(CostingError::LaborAmountOverflow { .. })
        ));
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        let rates = LaborRates::new(&[], LaborRatePolicy::CurrentWorkerRate);
        let records: Vec<_> = (0..2)
            .map(|_| {
                record(
                    CostSource::Misc,
                    Category::Other,
                    None,
                    Some(Decimal::MAX),
                    None,
                    None,
                )
            })
            .collect();

        let result = CostAggregator::aggregate(&records, &rates);

        assert!(matches!(result, Err(CostingError::AmountOverflow { .. })));
    }
}
