//! Worker double-booking detection.
//!
//! A worker is double-booked when two of their assignments on different
//! projects share at least one day.

pub mod detector;
pub mod error;
pub mod types;

pub use detector::ConflictDetector;
pub use error::ScheduleError;
pub use types::{Assignment, ScheduleConflict};
