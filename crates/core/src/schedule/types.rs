//! Schedule data types.

use buildledger_shared::types::{AssignmentId, DateRange, ProjectId, WorkerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;

/// A worker scheduled on a project for an inclusive date span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment ID.
    pub id: AssignmentId,
    /// Worker.
    pub worker_id: WorkerId,
    /// Project.
    pub project_id: ProjectId,
    /// First scheduled day.
    pub start_date: NaiveDate,
    /// Last scheduled day.
    pub end_date: NaiveDate,
}

impl Assignment {
    /// The assignment's days.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidAssignmentDates` if `end_date < start_date`.
    pub fn range(&self) -> Result<DateRange, ScheduleError> {
        DateRange::new(self.start_date, self.end_date).map_err(|_| {
            ScheduleError::InvalidAssignmentDates {
                id: self.id,
                start: self.start_date,
                end: self.end_date,
            }
        })
    }
}

/// Two overlapping assignments of the same worker on different projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// Double-booked worker.
    pub worker_id: WorkerId,
    /// Earlier-starting assignment.
    pub first: AssignmentId,
    /// Its project.
    pub first_project: ProjectId,
    /// Later-starting assignment.
    pub second: AssignmentId,
    /// Its project.
    pub second_project: ProjectId,
    /// Days both assignments cover.
    pub overlap: DateRange,
}
