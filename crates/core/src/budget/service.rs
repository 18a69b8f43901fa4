//! Budget service: variance helper and project/portfolio rollups.

use buildledger_shared::types::{BudgetId, CompanyId, DateRange, LaborRatePolicy, ProjectId};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ledger::LedgerBuilder;
use super::types::{BudgetHeader, BudgetLine, BudgetSummary, LedgerLine};
use super::variance::{VarianceResult, VarianceStatus, percent_used};
use crate::costing::error::{checked_diff, checked_sum};
use crate::costing::{
    CostAggregator, CostClassifier, CostCode, CostSource, CostingResult, LaborRates, RawCostRow,
    RollupScope, Worker,
};
use crate::unpaid::{UnpaidGroupings, UnpaidReport, UnpaidTracker};

/// Everything fetched for one project rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRollupInput {
    /// Project being rolled up.
    pub project_id: ProjectId,
    /// The project's budget header, if it has one.
    #[serde(default)]
    pub budget_header: Option<BudgetHeader>,
    /// Lines of that budget.
    #[serde(default)]
    pub budget_lines: Vec<BudgetLine>,
    /// Known cost codes.
    #[serde(default)]
    pub cost_codes: Vec<CostCode>,
    /// Workers, with their current rates.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Actual cost rows from every source.
    #[serde(default, alias = "cost_rows")]
    pub rows: Vec<RawCostRow>,
}

impl ProjectRollupInput {
    /// Creates an input with no budget and no actuals.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            budget_header: None,
            budget_lines: Vec::new(),
            cost_codes: Vec::new(),
            workers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Budget lines that apply to this project.
    ///
    /// A project without an active header has no budget: its lines are ignored
    /// and every budget figure is zero. Lines of another header are skipped.
    fn applicable_lines(&self) -> Vec<&BudgetLine> {
        let Some(header) = self
            .budget_header
            .as_ref()
            .filter(|header| header.is_active && header.project_id == self.project_id)
        else {
            if !self.budget_lines.is_empty() {
                debug!(
                    project_id = %self.project_id,
                    lines = self.budget_lines.len(),
                    "No active budget header, ignoring budget lines"
                );
            }
            return Vec::new();
        };

        let lines: Vec<_> = self
            .budget_lines
            .iter()
            .filter(|line| line.budget_id == header.id)
            .collect();
        if lines.len() < self.budget_lines.len() {
            debug!(
                budget_id = %header.id,
                skipped = self.budget_lines.len() - lines.len(),
                "Budget lines from another header skipped"
            );
        }
        lines
    }
}

/// Budget vs actual rollup of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRollup {
    /// Project.
    pub project_id: ProjectId,
    /// Budget header used, `None` when the project has no budget.
    pub budget_id: Option<BudgetId>,
    /// Ledger lines sorted by category.
    pub lines: Vec<LedgerLine>,
    /// Category and project totals.
    pub summary: BudgetSummary,
    /// Outstanding labor and subcontractor costs.
    pub unpaid: UnpaidReport,
    /// Number of actual cost records in scope.
    pub record_count: usize,
}

/// Company-wide rollup over several projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioRollup {
    /// Company.
    pub company_id: CompanyId,
    /// Per-project rollups, in input order.
    pub projects: Vec<ProjectRollup>,
    /// Sum of project budgets.
    pub total_budget: Decimal,
    /// Sum of project actuals.
    pub total_actual: Decimal,
    /// `total_budget - total_actual`.
    pub total_variance: Decimal,
    /// Overall `actual / budget * 100`.
    pub percent_used: Option<Decimal>,
    /// Overall variance classification.
    pub status: VarianceStatus,
    /// Sum of unpaid labor.
    pub labor_unpaid: Decimal,
}

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Calculate variance between budgeted and actual cost.
    ///
    /// `variance = budgeted - actual`: positive (under budget) is favorable,
    /// negative (over budget) is unfavorable.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::AmountOverflow`](crate::costing::CostingError)
    /// if the difference does not fit in a decimal.
    pub fn calculate_variance(budgeted: Decimal, actual: Decimal) -> CostingResult<VarianceResult> {
        let variance = checked_diff(budgeted, actual, "computing variance")?;

        let variance_percent = if budgeted.is_zero() {
            Decimal::ZERO
        } else {
            variance
                .checked_div(budgeted)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
        };

        Ok(VarianceResult {
            budgeted,
            actual,
            variance,
            variance_percent,
            utilization_percent: percent_used(budgeted, actual),
            status: VarianceStatus::from_remaining(variance),
        })
    }

    /// Rolls up one project.
    ///
    /// Scope filter, classification, aggregation, ledger and unpaid split, in
    /// that order. The scope is narrowed to the input's project.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if an amount
    /// or a total overflows.
    pub fn project_rollup(
        input: &ProjectRollupInput,
        scope: &RollupScope,
        policy: LaborRatePolicy,
    ) -> CostingResult<ProjectRollup> {
        let scope = RollupScope {
            project_id: Some(input.project_id),
            ..*scope
        };

        let classifier = CostClassifier::new(&input.cost_codes);
        let rates = LaborRates::new(&input.workers, policy);
        let rows = scope.filter(&input.rows, &rates);

        let records = classifier.classify_all(rows);
        let actuals = CostAggregator::aggregate(&records, &rates)?;

        let budget_lines = input.applicable_lines();
        let mut ledger = LedgerBuilder::build(budget_lines, &classifier, &actuals)?;

        let labor = UnpaidTracker::split(&records, CostSource::Labor, &rates)?;
        ledger.summary.labor_unpaid = labor.unpaid.amount;
        ledger.summary.labor_paid = labor.paid.amount;

        let unpaid = UnpaidTracker::track(&records, &rates, UnpaidGroupings::all())?;

        debug!(
            project_id = %input.project_id,
            records = records.len(),
            lines = ledger.lines.len(),
            total_actual = %ledger.summary.total_actual,
            "Project rollup computed"
        );

        Ok(ProjectRollup {
            project_id: input.project_id,
            budget_id: input
                .budget_header
                .as_ref()
                .filter(|header| header.is_active && header.project_id == input.project_id)
                .map(|header| header.id),
            lines: ledger.lines,
            summary: ledger.summary,
            unpaid,
            record_count: records.len(),
        })
    }

    /// Rolls up every project of a company.
    ///
    /// Projects are independent and computed in parallel; results keep input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a [`CostingError`](crate::costing::CostingError) if any
    /// project, or the portfolio total, overflows.
    pub fn portfolio_rollup(
        company_id: CompanyId,
        inputs: &[ProjectRollupInput],
        range: Option<DateRange>,
        policy: LaborRatePolicy,
    ) -> CostingResult<PortfolioRollup> {
        let scope = RollupScope::company(company_id).with_range(range);

        let projects: Vec<ProjectRollup> = inputs
            .par_iter()
            .map(|input| Self::project_rollup(input, &scope, policy))
            .collect::<CostingResult<_>>()?;

        let mut total_budget = Decimal::ZERO;
        let mut total_actual = Decimal::ZERO;
        let mut labor_unpaid = Decimal::ZERO;
        for project in &projects {
            total_budget =
                checked_sum(total_budget, project.summary.total_budget, "summing portfolio budgets")?;
            total_actual =
                checked_sum(total_actual, project.summary.total_actual, "summing portfolio actuals")?;
            labor_unpaid = checked_sum(
                labor_unpaid,
                project.summary.labor_unpaid,
                "summing portfolio unpaid labor",
            )?;
        }

        let overall = Self::calculate_variance(total_budget, total_actual)?;

        info!(
            company_id = %company_id,
            projects = projects.len(),
            total_actual = %total_actual,
            "Portfolio rollup computed"
        );

        Ok(PortfolioRollup {
            company_id,
            projects,
            total_budget,
            total_actual,
            total_variance: overall.variance,
            percent_used: overall.utilization_percent,
            status: overall.status,
            labor_unpaid,
        })
    }
}
