//! Budget data types.

use buildledger_shared::types::{BudgetId, BudgetLineId, CostCodeId, ProjectId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::variance::VarianceStatus;
use crate::costing::{ActualKey, Category};

/// A project budget header. A project has at most one active header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetHeader {
    /// Budget ID.
    pub id: BudgetId,
    /// Project the budget belongs to.
    pub project_id: ProjectId,
    /// Budget name.
    #[serde(default)]
    pub name: String,
    /// Whether this is the project's active budget.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// A budget line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Budget line ID.
    pub id: BudgetLineId,
    /// Parent budget header.
    pub budget_id: BudgetId,
    /// Cost code the line budgets for; `None` budgets the category's unassigned costs.
    #[serde(default)]
    pub cost_code_id: Option<CostCodeId>,
    /// Category.
    pub category: Category,
    /// Line description.
    #[serde(default)]
    pub description: String,
    /// Budgeted amount.
    pub budget_amount: Decimal,
    /// Budgeted hours.
    #[serde(default)]
    pub budget_hours: Option<Decimal>,
}

impl BudgetLine {
    /// Actuals bucket this line is compared against.
    #[must_use]
    pub fn key(&self) -> ActualKey {
        self.cost_code_id
            .map_or(ActualKey::Unassigned(self.category), ActualKey::CostCode)
    }
}

/// One row of the budget vs actual report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerLine {
    /// Actuals bucket.
    pub key: ActualKey,
    /// Cost code, `None` for unassigned rows.
    pub cost_code_id: Option<CostCodeId>,
    /// Cost code text, or `UNASSIGNED`.
    pub code: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: Category,
    /// Budgeted amount.
    pub budget_amount: Decimal,
    /// Budgeted hours.
    pub budget_hours: Decimal,
    /// Actual amount.
    pub actual_amount: Decimal,
    /// Actual hours.
    pub actual_hours: Decimal,
    /// `actual_amount - budget_amount`; positive means over budget.
    pub variance: Decimal,
    /// `actual / budget * 100`, absent when nothing was budgeted.
    pub percent_used: Option<Decimal>,
    /// True for rows synthesized from spend that no budget line covers.
    pub out_of_budget: bool,
}

/// Budget vs actual totals for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    /// Budgeted amount.
    pub budget: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// `budget - actual`; positive means under budget.
    pub variance: Decimal,
    /// Budgeted hours.
    pub budget_hours: Decimal,
    /// Actual hours.
    pub actual_hours: Decimal,
    /// Variance classification.
    pub status: VarianceStatus,
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self {
            budget: Decimal::ZERO,
            actual: Decimal::ZERO,
            variance: Decimal::ZERO,
            budget_hours: Decimal::ZERO,
            actual_hours: Decimal::ZERO,
            status: VarianceStatus::OnBudget,
        }
    }
}

/// Project-level budget summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    /// Labor totals.
    pub labor: CategoryTotals,
    /// Subcontractor totals.
    pub subs: CategoryTotals,
    /// Materials totals.
    pub materials: CategoryTotals,
    /// Other totals.
    pub other: CategoryTotals,
    /// Total budgeted amount.
    pub total_budget: Decimal,
    /// Total actual amount.
    pub total_actual: Decimal,
    /// `total_budget - total_actual`; positive means under budget.
    pub total_variance: Decimal,
    /// Overall `actual / budget * 100`, absent without a budget.
    pub percent_used: Option<Decimal>,
    /// Overall variance classification.
    pub status: VarianceStatus,
    /// Labor cost not yet paid.
    pub labor_unpaid: Decimal,
    /// Labor cost already paid.
    pub labor_paid: Decimal,
}

impl Default for BudgetSummary {
    fn default() -> Self {
        Self {
            labor: CategoryTotals::default(),
            subs: CategoryTotals::default(),
            materials: CategoryTotals::default(),
            other: CategoryTotals::default(),
            total_budget: Decimal::ZERO,
            total_actual: Decimal::ZERO,
            total_variance: Decimal::ZERO,
            percent_used: None,
            status: VarianceStatus::OnBudget,
            labor_unpaid: Decimal::ZERO,
            labor_paid: Decimal::ZERO,
        }
    }
}

impl BudgetSummary {
    /// Totals for one category.
    #[must_use]
    pub fn category(&self, category: Category) -> &CategoryTotals {
        match category {
            Category::Labor => &self.labor,
            Category::Subs => &self.subs,
            Category::Materials => &self.materials,
            Category::Other => &self.other,
        }
    }

    /// Mutable totals for one category.
    pub fn category_mut(&mut self, category: Category) -> &mut CategoryTotals {
        match category {
            Category::Labor => &mut self.labor,
            Category::Subs => &mut self.subs,
            Category::Materials => &mut self.materials,
            Category::Other => &mut self.other,
        }
    }
}

/// Ledger lines plus their summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetLedger {
    /// Lines sorted by category.
    pub lines: Vec<LedgerLine>,
    /// Summary totals.
    pub summary: BudgetSummary,
}
