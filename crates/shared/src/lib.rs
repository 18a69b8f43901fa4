//! Shared types, errors, and configuration for Buildledger.
//!
//! This crate provides common types used across all other crates:
//! - Reporting currency codes
//! - Typed IDs for type-safe entity references
//! - Labor rate policies
//! - Inclusive date ranges for rollup scopes
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
