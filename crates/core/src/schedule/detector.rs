//! Conflict detection over worker assignments.

use std::collections::BTreeMap;

use buildledger_shared::types::{DateRange, WorkerId};
use tracing::debug;

use super::error::ScheduleError;
use super::types::{Assignment, ScheduleConflict};

/// Finds double-booked workers.
pub struct ConflictDetector;

impl ConflictDetector {
    /// Every conflicting pair among `assignments`.
    ///
    /// Results are ordered by worker, then by the first assignment's start.
    /// Overlapping assignments on the same project are not conflicts.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidAssignmentDates` if any assignment ends
    /// before it starts.
    pub fn detect(assignments: &[Assignment]) -> Result<Vec<ScheduleConflict>, ScheduleError> {
        let mut by_worker: BTreeMap<WorkerId, Vec<(DateRange, &Assignment)>> = BTreeMap::new();
        for assignment in assignments {
            by_worker
                .entry(assignment.worker_id)
                .or_default()
                .push((assignment.range()?, assignment));
        }

        let mut conflicts = Vec::new();
        for (worker_id, mut booked) in by_worker {
            booked.sort_by(|(a_range, a), (b_range, b)| {
                a_range
                    .start()
                    .cmp(&b_range.start())
                    .then(a_range.end().cmp(&b_range.end()))
                    .then(a.id.cmp(&b.id))
            });

            for (i, (range, first)) in booked.iter().enumerate() {
                for (other_range, second) in &booked[i + 1..] {
                    if other_range.start() > range.end() {
                        break;
                    }
                    if first.project_id == second.project_id {
                        continue;
                    }
                    if let Some(overlap) = range.intersection(other_range) {
                        conflicts.push(Self::conflict(worker_id, first, second, overlap));
                    }
                }
            }
        }

        debug!(
            assignments = assignments.len(),
            conflicts = conflicts.len(),
            "Schedule conflicts detected"
        );
        Ok(conflicts)
    }

    /// Conflicts a proposed assignment would create against existing ones.
    ///
    /// `existing` may hold other workers' assignments and the candidate itself;
    /// both are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidAssignmentDates` if the candidate or a
    /// relevant existing assignment ends before it starts.
    pub fn conflicts_for(
        candidate: &Assignment,
        existing: &[Assignment],
    ) -> Result<Vec<ScheduleConflict>, ScheduleError> {
        let range = candidate.range()?;
        let mut conflicts = Vec::new();

        for other in existing.iter().filter(|other| {
            other.worker_id == candidate.worker_id
                && other.id != candidate.id
                && other.project_id != candidate.project_id
        }) {
            if let Some(overlap) = range.intersection(&other.range()?) {
                conflicts.push(Self::conflict(candidate.worker_id, candidate, other, overlap));
            }
        }

        conflicts.sort_by_key(|conflict| conflict.overlap.start());
        Ok(conflicts)
    }

    fn conflict(
        worker_id: WorkerId,
        first: &Assignment,
        second: &Assignment,
        overlap: DateRange,
    ) -> ScheduleConflict {
        ScheduleConflict {
            worker_id,
            first: first.id,
            first_project: first.project_id,
            second: second.id,
            second_project: second.project_id,
            overlap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildledger_shared::types::{AssignmentId, ProjectId};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    fn assign(worker_id: WorkerId, project_id: ProjectId, start: u32, end: u32) -> Assignment {
        Assignment {
            id: AssignmentId::new(),
            worker_id,
            project_id,
            start_date: d(start),
            end_date: d(end),
        }
    }

    #[test]
    fn test_overlap_on_different_projects_conflicts() {
        let worker = WorkerId::new();
        let a = assign(worker, ProjectId::new(), 1, 10);
        let b = assign(worker, ProjectId::new(), 8, 15);

        let conflicts = ConflictDetector::detect(&[b.clone(), a.clone()]).unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first, a.id);
        assert_eq!(conflicts[0].second, b.id);
        assert_eq!(conflicts[0].overlap, DateRange::new(d(8), d(10)).unwrap());
    }

    #[test]
    fn test_touching_single_day_conflicts() {
        let worker = WorkerId::new();
        let a = assign(worker, ProjectId::new(), 1, 5);
        let b = assign(worker, ProjectId::new(), 5, 9);

        let conflicts = ConflictDetector::detect(&[a, b]).unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].overlap, DateRange::new(d(5), d(5)).unwrap());
    }

    #[test]
    fn test_same_project_and_other_workers_do_not_conflict() {
        let project = ProjectId::new();
        let worker = WorkerId::new();
        let assignments = vec![
            assign(worker, project, 1, 10),
            assign(worker, project, 5, 12),
            assign(WorkerId::new(), ProjectId::new(), 1, 30),
            assign(worker, ProjectId::new(), 13, 20),
        ];

        assert!(ConflictDetector::detect(&assignments).unwrap().is_empty());
    }

    #[test]
    fn test_long_assignment_conflicts_with_each_later_one() {
        let worker = WorkerId::new();
        let long = assign(worker, ProjectId::new(), 1, 30);
        let assignments = vec![
            long.clone(),
            assign(worker, ProjectId::new(), 3, 4),
            assign(worker, ProjectId::new(), 20, 21),
        ];

        let conflicts = ConflictDetector::detect(&assignments).unwrap();

        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| c.first == long.id));
        assert_eq!(conflicts[0].overlap.start(), d(3));
        assert_eq!(conflicts[1].overlap.start(), d(20));
    }

    #[test]
    fn test_inverted_assignment_is_rejected() {
        let bad = assign(WorkerId::new(), ProjectId::new(), 10, 2);

        let err = ConflictDetector::detect(std::slice::from_ref(&bad)).unwrap_err();

        assert_eq!(
            err,
            ScheduleError::InvalidAssignmentDates {
                id: bad.id,
                start: d(10),
                end: d(2),
            }
        );
    }

    #[test]
    fn test_candidate_checked_against_existing() {
        let worker = WorkerId::new();
        let existing = vec![
            assign(worker, ProjectId::new(), 1, 5),
            assign(worker, ProjectId::new(), 20, 25),
            assign(WorkerId::new(), ProjectId::new(), 1, 30),
        ];
        let candidate = assign(worker, ProjectId::new(), 4, 21);

        let conflicts = ConflictDetector::conflicts_for(&candidate, &existing).unwrap();

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].first, candidate.id);
        assert_eq!(conflicts[0].second, existing[0].id);
        assert_eq!(conflicts[1].overlap, DateRange::new(d(20), d(21)).unwrap());
    }
}
