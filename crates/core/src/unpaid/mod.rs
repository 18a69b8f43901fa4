//! Paid/unpaid splits of labor and subcontractor actuals.

pub mod tracker;
pub mod types;

pub use tracker::UnpaidTracker;
pub use types::{PaymentSplit, UnpaidGroupings, UnpaidReport};
