//! Budget vs actual ledger and project rollups.

pub mod ledger;
pub mod service;
pub mod types;
pub mod variance;


pub use ledger::LedgerBuilder;
pub use service::{BudgetService, PortfolioRollup, ProjectRollup, ProjectRollupInput};
pub use types::{
    BudgetHeader, BudgetLedger, BudgetLine, BudgetSummary, CategoryTotals, LedgerLine,
};
pub use variance::{VarianceResult, VarianceStatus};
