//! Company report routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use buildledger_core::costing::{CostClassifier, CostCode, LaborRates, SourceRows, Worker};
use buildledger_core::reports::{WeeklyReport, WeeklyReportBuilder};
use buildledger_shared::types::{CompanyId, DateRange, LaborRatePolicy};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/companies/{company_id}/reports/weekly", post(weekly_report))
}

/// Request body for the weekly company report.
#[derive(Debug, Deserialize)]
pub struct WeeklyReportRequest {
    /// First day of the report.
    pub from: NaiveDate,
    /// Last day of the report.
    pub to: NaiveDate,
    /// Workers with current rates.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Known cost codes.
    #[serde(default)]
    pub cost_codes: Vec<CostCode>,
    /// Actual cost rows.
    #[serde(flatten)]
    pub rows: SourceRows,
    /// Overrides the configured labor rate policy.
    #[serde(default)]
    pub labor_rate_policy: Option<LaborRatePolicy>,
}

/// POST `/companies/{company_id}/reports/weekly` - Weekly cost report.
async fn weekly_report(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<WeeklyReportRequest>,
) -> Result<Json<WeeklyReport>, ApiError> {
    let range = DateRange::new(payload.from, payload.to)?;
    let policy = payload
        .labor_rate_policy
        .unwrap_or(state.rollup.labor_rate_policy);

    let rows = payload.rows.into_rows();
    let classifier = CostClassifier::new(&payload.cost_codes);
    let records = classifier.classify_all(&rows);
    let rates = LaborRates::new(&payload.workers, policy);

    let report = WeeklyReportBuilder::build(company_id, range, &records, &rates)?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::super::test_support::post_json;

    fn dec_at(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_weekly_report_groups_weeks() {
        let company = Uuid::now_v7();
        let project = Uuid::now_v7();
        let body = json!({
            "from": "2024-06-01",
            "to": "2024-06-30",
            "sub_invoices": [
                { "id": Uuid::now_v7(), "project_id": project, "date": "2024-06-04", "amount": "1000" },
                { "id": Uuid::now_v7(), "project_id": project, "date": "2024-06-11", "amount": "500" }
            ]
        });

        let (status, body) =
            post_json(&format!("/api/v1/companies/{company}/reports/weekly"), &body).await;

        assert_eq!(status, StatusCode::OK);
        let weeks = body["weeks"].as_array().unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0]["week_start"], "2024-06-03");
        assert_eq!(dec_at(&weeks[0]["totals"]["subs"]), dec!(1000));
        assert_eq!(dec_at(&body["grand_total"]["total"]), dec!(1500));
    }

    #[tokio::test]
    async fn test_weekly_report_rejects_inverted_range() {
        let company = Uuid::now_v7();
        let body = json!({ "from": "2024-06-30", "to": "2024-06-01" });

        let (status, body) =
            post_json(&format!("/api/v1/companies/{company}/reports/weekly"), &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
