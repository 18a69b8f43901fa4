//! Inclusive calendar date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A date range was constructed with its start after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid date range: start {start} is after end {end}")]
pub struct DateRangeError {
    /// Requested start.
    pub start: NaiveDate,
    /// Requested end.
    pub end: NaiveDate,
}

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the overlapping part of two ranges, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = DateRange::new(d(2024, 3, 2), d(2024, 3, 1)).unwrap_err();
        assert_eq!(err.start, d(2024, 3, 2));
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2024-03-02 is after end 2024-03-01"
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(d(2024, 3, 1), d(2024, 3, 7)).unwrap();
        assert!(range.contains(d(2024, 3, 1)));
        assert!(range.contains(d(2024, 3, 7)));
        assert!(!range.contains(d(2024, 3, 8)));
    }

    #[test]
    fn test_intersection() {
        let a = DateRange::new(d(2024, 3, 1), d(2024, 3, 10)).unwrap();
        let b = DateRange::new(d(2024, 3, 10), d(2024, 3, 20)).unwrap();
        let c = DateRange::new(d(2024, 3, 11), d(2024, 3, 20)).unwrap();

        assert_eq!(
            a.intersection(&b),
            Some(DateRange::new(d(2024, 3, 10), d(2024, 3, 10)).unwrap())
        );
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_deserialize_validates_order() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-03-01","end":"2024-03-07"}"#).unwrap();
        assert_eq!(ok.end(), d(2024, 3, 7));

        let bad = serde_json::from_str::<DateRange>(r#"{"start":"2024-03-08","end":"2024-03-07"}"#);
        assert!(bad.is_err());
    }
}
