//! Cost code auto-generation from trade names.

pub mod error;
pub mod generator;

pub use error::CostCodeError;
pub use generator::{CostCodeGenerator, Trade};
