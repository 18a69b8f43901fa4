//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buildledger_core::cost_code::CostCodeError;
use buildledger_core::costing::CostingError;
use buildledger_core::schedule::ScheduleError;
use buildledger_shared::AppError;
use buildledger_shared::types::DateRangeError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by handlers, rendered as `{ "error", "message" }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DateRangeError> for ApiError {
    fn from(err: DateRangeError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<CostingError> for ApiError {
    fn from(err: CostingError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<CostCodeError> for ApiError {
    fn from(err: CostCodeError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}
