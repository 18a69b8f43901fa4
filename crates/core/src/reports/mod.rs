//! Company cost report generation.
//!
//! Pure business logic for the weekly company report: per-week, per-project
//! labor, subcontractor, materials and other spend.

pub mod types;
pub mod weekly;

pub use types::*;
pub use weekly::WeeklyReportBuilder;
