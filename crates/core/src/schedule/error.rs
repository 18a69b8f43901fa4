//! Schedule error types.

use buildledger_shared::types::AssignmentId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while checking schedules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Assignment ends before it starts.
    #[error("Assignment {id} ends on {end} before it starts on {start}")]
    InvalidAssignmentDates {
        /// The offending assignment.
        id: AssignmentId,
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}
