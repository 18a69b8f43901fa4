//! Budget ledger builder.
//!
//! Joins budget lines with aggregated actuals by cost code. Each actuals bucket
//! is claimed by at most one ledger line; buckets no budget line claims become
//! out-of-budget lines so spend is never dropped.

use rust_decimal::Decimal;
use tracing::debug;

use super::service::BudgetService;
use super::types::{BudgetLedger, BudgetLine, BudgetSummary, LedgerLine};
use super::variance::percent_used;
use crate::costing::error::{checked_diff, checked_sum};
use crate::costing::{ActualKey, Actuals, Category, CostClassifier, CostingResult, Totals};

/// Code shown on ledger lines for costs without a cost code.
pub const UNASSIGNED_CODE: &str = "UNASSIGNED";

/// Builds budget vs actual ledgers.
pub struct LedgerBuilder;

impl LedgerBuilder {
    /// Builds the ledger and its summary.
    ///
    /// Every budget line yields exactly one ledger line, in input order within
    /// its category, followed by the out-of-budget lines. Lines are sorted by
    /// category name. `labor_unpaid`/`labor_paid` are left at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if a variance
    /// or a summary total overflows.
    pub fn build<'b, I>(
        budget_lines: I,
        classifier: &CostClassifier<'_>,
        actuals: &Actuals,
    ) -> CostingResult<BudgetLedger>
    where
        I: IntoIterator<Item = &'b BudgetLine>,
    {
        let mut pool = actuals.by_key.clone();
        let mut lines = Vec::new();

        for budget_line in budget_lines {
            let key = budget_line.key();
            let actual = pool.remove(&key).unwrap_or_default();
            let code = match budget_line.cost_code_id {
                Some(id) => classifier
                    .cost_code(id)
                    .map_or_else(String::new, |code| code.code.clone()),
                None => UNASSIGNED_CODE.to_string(),
            };

            lines.push(Self::line(
                key,
                code,
                budget_line.description.clone(),
                budget_line.category,
                budget_line.budget_amount,
                budget_line.budget_hours.unwrap_or(Decimal::ZERO),
                actual,
                false,
            )?);
        }

        for (key, actual) in pool {
            let (code, description, category) = match key {
                ActualKey::CostCode(id) => match classifier.cost_code(id) {
                    Some(code) => (code.code.clone(), code.name.clone(), code.category),
                    None => {
                        debug!(cost_code_id = %id, "Actuals booked to an unknown cost code");
                        (String::new(), "Unknown cost code".to_string(), Category::Other)
                    }
                },
                ActualKey::Unassigned(category) => (
                    UNASSIGNED_CODE.to_string(),
                    format!("Unassigned {}", category.label()),
                    category,
                ),
            };

            lines.push(Self::line(
                key,
                code,
                description,
                category,
                Decimal::ZERO,
                Decimal::ZERO,
                actual,
                true,
            )?);
        }

        lines.sort_by_key(|line| line.category);

        let summary = Self::summarize(&lines)?;
        Ok(BudgetLedger { lines, summary })
    }

    /// Rolls ledger lines up per category and overall.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if a total
    /// overflows.
    pub fn summarize(lines: &[LedgerLine]) -> CostingResult<BudgetSummary> {
        let mut summary = BudgetSummary::default();

        for line in lines {
            let totals = summary.category_mut(line.category);
            totals.budget = checked_sum(totals.budget, line.budget_amount, "summing budgets")?;
            totals.actual = checked_sum(totals.actual, line.actual_amount, "summing actuals")?;
            totals.budget_hours =
                checked_sum(totals.budget_hours, line.budget_hours, "summing budget hours")?;
            totals.actual_hours =
                checked_sum(totals.actual_hours, line.actual_hours, "summing actual hours")?;

            summary.total_budget =
                checked_sum(summary.total_budget, line.budget_amount, "summing budgets")?;
            summary.total_actual =
                checked_sum(summary.total_actual, line.actual_amount, "summing actuals")?;
        }

        for category in Category::ALL {
            let totals = summary.category_mut(category);
            let result = BudgetService::calculate_variance(totals.budget, totals.actual)?;
            totals.variance = result.variance;
            totals.status = result.status;
        }

        let overall =
            BudgetService::calculate_variance(summary.total_budget, summary.total_actual)?;
        summary.total_variance = overall.variance;
        summary.percent_used = overall.utilization_percent;
        summary.status = overall.status;

        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    fn line(
        key: ActualKey,
        code: String,
        description: String,
        category: Category,
        budget_amount: Decimal,
        budget_hours: Decimal,
        actual: Totals,
        out_of_budget: bool,
    ) -> CostingResult<LedgerLine> {
        Ok(LedgerLine {
            key,
            cost_code_id: match key {
                ActualKey::CostCode(id) => Some(id),
                ActualKey::Unassigned(_) => None,
            },
            code,
            description,
            category,
            budget_amount,
            budget_hours,
            actual_amount: actual.amount,
            actual_hours: actual.hours,
            variance: checked_diff(actual.amount, budget_amount, "computing line variance")?,
            percent_used: percent_used(budget_amount, actual.amount),
            out_of_budget,
        })
    }
}
