//! API route definitions.

use axum::Router;
use buildledger_shared::types::DateRange;
use chrono::NaiveDate;

use crate::{AppState, error::ApiError};

pub mod cost_codes;
pub mod health;
pub mod labor;
pub mod reports;
pub mod rollups;
pub mod schedule;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(rollups::routes())
        .merge(labor::routes())
        .merge(reports::routes())
        .merge(schedule::routes())
        .merge(cost_codes::routes())
}

/// Builds an optional date range from optional `from`/`to` bounds.
///
/// A missing bound is open-ended.
pub(crate) fn date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Option<DateRange>, ApiError> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let range = DateRange::new(from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))?;
    Ok(Some(range))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_date_range_bounds() {
        assert_eq!(date_range(None, None).unwrap(), None);

        let open_end = date_range(Some(d(5)), None).unwrap().unwrap();
        assert_eq!(open_end.start(), d(5));
        assert!(open_end.contains(d(31)));

        let closed = date_range(Some(d(1)), Some(d(2))).unwrap().unwrap();
        assert!(!closed.contains(d(3)));

        assert!(date_range(Some(d(9)), Some(d(2))).is_err());
    }
}
