//! Unpaid labor routes.

use axum::{Json, Router, extract::State, routing::post};
use buildledger_core::costing::{
    CostClassifier, CostCode, LaborRates, RollupScope, SourceRows, Worker,
};
use buildledger_core::unpaid::{UnpaidGroupings, UnpaidReport, UnpaidTracker};
use buildledger_shared::types::{CompanyId, LaborRatePolicy, ProjectId};
use chrono::NaiveDate;
use serde::Deserialize;

use super::date_range;
use crate::{AppState, error::ApiError};

/// Creates the unpaid labor routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/labor/unpaid", post(unpaid))
}

/// One grouping of the unpaid report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Per worker.
    Worker,
    /// Per project.
    Project,
    /// Per company.
    Company,
}

/// Request body for the unpaid report.
#[derive(Debug, Deserialize)]
pub struct UnpaidRequest {
    /// Workers with current rates.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Known cost codes.
    #[serde(default)]
    pub cost_codes: Vec<CostCode>,
    /// Actual cost rows.
    #[serde(flatten)]
    pub rows: SourceRows,
    /// Groupings to compute; all three when absent.
    #[serde(default)]
    pub group_by: Option<Vec<GroupBy>>,
    /// Restrict to one project.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Restrict to one company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// First day to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last day to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Overrides the configured labor rate policy.
    #[serde(default)]
    pub labor_rate_policy: Option<LaborRatePolicy>,
}

fn groupings(group_by: Option<&[GroupBy]>) -> UnpaidGroupings {
    group_by.map_or_else(UnpaidGroupings::all, |groups| UnpaidGroupings {
        by_worker: groups.contains(&GroupBy::Worker),
        by_project: groups.contains(&GroupBy::Project),
        by_company: groups.contains(&GroupBy::Company),
    })
}

/// POST `/labor/unpaid` - Outstanding labor and subcontractor costs.
async fn unpaid(
    State(state): State<AppState>,
    Json(payload): Json<UnpaidRequest>,
) -> Result<Json<UnpaidReport>, ApiError> {
    let scope = RollupScope {
        project_id: payload.project_id,
        company_id: payload.company_id,
        range: date_range(payload.from, payload.to)?,
    };
    let policy = payload
        .labor_rate_policy
        .unwrap_or(state.rollup.labor_rate_policy);

    let rows = payload.rows.into_rows();
    let classifier = CostClassifier::new(&payload.cost_codes);
    let rates = LaborRates::new(&payload.workers, policy);
    let records = classifier.classify_all(scope.filter(&rows, &rates));

    let report = UnpaidTracker::track(&records, &rates, groupings(payload.group_by.as_deref()))?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::super::test_support::post_json;

    fn dec_at(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_groupings_default_to_all() {
        assert_eq!(groupings(None), UnpaidGroupings::all());
        assert_eq!(groupings(Some(&[][..])), UnpaidGroupings::none());
        let worker_only = groupings(Some(&[GroupBy::Worker][..]));
        assert!(worker_only.by_worker);
        assert!(!worker_only.by_project);
    }

    #[tokio::test]
    async fn test_unpaid_counts_only_unpaid_subset() {
        let worker = Uuid::now_v7();
        let project = Uuid::now_v7();
        let log = |status: &str| {
            json!({
                "id": Uuid::now_v7(), "project_id": project, "worker_id": worker,
                "date": "2024-07-01", "hours_worked": "4", "payment_status": status
            })
        };
        let body = json!({
            "workers": [{ "id": worker, "name": "W", "hourly_rate": "25" }],
            "time_logs": [log("paid"), log("unpaid")],
            "group_by": ["worker"]
        });

        let (status, body) = post_json("/api/v1/labor/unpaid", &body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(dec_at(&body["total_unpaid_amount"]), dec!(100));
        assert_eq!(dec_at(&body["total_unpaid_hours"]), dec!(4));
        assert_eq!(dec_at(&body["by_worker"][worker.to_string()]["amount"]), dec!(100));
        assert!(body["by_project"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_company_filter_uses_worker_company() {
        let company = Uuid::now_v7();
        let own = Uuid::now_v7();
        let borrowed = Uuid::now_v7();
        let project = Uuid::now_v7();
        let log = |worker: Uuid| {
            json!({
                "id": Uuid::now_v7(), "project_id": project, "worker_id": worker,
                "date": "2024-07-01", "hours_worked": "2"
            })
        };
        let body = json!({
            "workers": [
                { "id": own, "name": "Own", "company_id": company, "hourly_rate": "30" },
                { "id": borrowed, "name": "Borrowed", "company_id": Uuid::now_v7(), "hourly_rate": "50" }
            ],
            "time_logs": [log(own), log(borrowed)],
            "company_id": company
        });

        let (status, body) = post_json("/api/v1/labor/unpaid", &body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(dec_at(&body["total_unpaid_amount"]), dec!(60));
        assert_eq!(body["by_worker"].as_object().unwrap().len(), 1);
    }
}
