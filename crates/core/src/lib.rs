//! Core business logic for Buildledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every operation is a synchronous function of the rows it is handed; nothing
//! is cached or shared between calls.
//!
//! # Modules
//!
//! - `costing` - Cost classification, labor pricing, and actual-cost aggregation
//! - `budget` - Budget vs actual ledger and project/portfolio rollups
//! - `unpaid` - Paid/unpaid splits of labor and subcontractor actuals
//! - `reports` - Weekly company cost reports
//! - `schedule` - Worker double-booking detection
//! - `cost_code` - Cost code generation from trade names

pub mod budget;
pub mod cost_code;
pub mod costing;
pub mod reports;
pub mod schedule;
pub mod unpaid;
