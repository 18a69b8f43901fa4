//! Schedule conflict routes.

use axum::{Json, Router, routing::post};
use buildledger_core::schedule::{Assignment, ConflictDetector, ScheduleConflict};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Creates the schedule routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/schedule/conflicts", post(conflicts))
}

/// Request body for conflict detection.
#[derive(Debug, Deserialize)]
pub struct ConflictRequest {
    /// Existing assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Proposed assignment; when present only its conflicts are returned.
    #[serde(default)]
    pub candidate: Option<Assignment>,
}

/// Conflict detection response.
#[derive(Debug, Serialize)]
pub struct ConflictResponse {
    /// Conflicting assignment pairs.
    pub conflicts: Vec<ScheduleConflict>,
}

/// POST `/schedule/conflicts` - Worker double-booking check.
async fn conflicts(Json(payload): Json<ConflictRequest>) -> Result<Json<ConflictResponse>, ApiError> {
    let conflicts = match &payload.candidate {
        Some(candidate) => ConflictDetector::conflicts_for(candidate, &payload.assignments)?,
        None => ConflictDetector::detect(&payload.assignments)?,
    };
    Ok(Json(ConflictResponse { conflicts }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    use super::super::test_support::post_json;

    #[tokio::test]
    async fn test_double_booking_reported() {
        let worker = Uuid::now_v7();
        let body = json!({
            "assignments": [
                { "id": Uuid::now_v7(), "worker_id": worker, "project_id": Uuid::now_v7(),
                  "start_date": "2024-09-01", "end_date": "2024-09-10" },
                { "id": Uuid::now_v7(), "worker_id": worker, "project_id": Uuid::now_v7(),
                  "start_date": "2024-09-08", "end_date": "2024-09-12" }
            ]
        });

        let (status, body) = post_json("/api/v1/schedule/conflicts", &body).await;

        assert_eq!(status, StatusCode::OK);
        let conflicts = body["conflicts"].as_array().unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0]["overlap"]["start"], "2024-09-08");
        assert_eq!(conflicts[0]["overlap"]["end"], "2024-09-10");
    }

    #[tokio::test]
    async fn test_invalid_candidate_rejected() {
        let body = json!({
            "candidate": { "id": Uuid::now_v7(), "worker_id": Uuid::now_v7(), "project_id": Uuid::now_v7(),
                           "start_date": "2024-09-10", "end_date": "2024-09-01" }
        });

        let (status, body) = post_json("/api/v1/schedule/conflicts", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
