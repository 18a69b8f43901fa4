//! Common types used across the application.

pub mod id;
pub mod money;
pub mod period;
pub mod policy;

pub use id::*;
pub use money::Currency;
pub use period::{DateRange, DateRangeError};
pub use policy::LaborRatePolicy;
