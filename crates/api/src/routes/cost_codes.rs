//! Cost code generation routes.

use axum::{Json, Router, routing::post};
use buildledger_core::cost_code::{CostCodeGenerator, Trade};
use buildledger_core::costing::CostCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the cost code routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/cost-codes/generate", post(generate))
}

/// Request body for cost code generation.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Trades to generate codes for.
    pub trades: Vec<Trade>,
    /// Codes that already exist.
    #[serde(default)]
    pub existing: Vec<CostCode>,
}

/// Cost code generation response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Newly generated codes.
    pub generated: Vec<CostCode>,
}

/// POST `/cost-codes/generate` - Standard cost codes for trades.
async fn generate(Json(payload): Json<GenerateRequest>) -> Result<Json<GenerateResponse>, ApiError> {
    let generated = CostCodeGenerator::generate(&payload.trades, &payload.existing)?;
    info!(count = generated.len(), "Cost codes generated");
    Ok(Json(GenerateResponse { generated }))
}
