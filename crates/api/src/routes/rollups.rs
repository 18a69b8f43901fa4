//! Budget vs actual rollup routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use buildledger_core::budget::{
    BudgetHeader, BudgetLine, BudgetService, PortfolioRollup, ProjectRollup, ProjectRollupInput,
};
use buildledger_core::costing::{CostCode, RollupScope, SourceRows, Worker};
use buildledger_shared::types::{CompanyId, LaborRatePolicy, ProjectId};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::date_range;
use crate::{AppState, error::ApiError};

/// Creates the rollup routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{project_id}/budget-ledger", post(project_ledger))
        .route("/companies/{company_id}/portfolio", post(portfolio))
}

// ============================================================================
// Request Types
// ============================================================================

/// Budget and actual rows of one project, as fetched from the data store.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectData {
    /// Active budget header, if any.
    #[serde(default)]
    pub budget_header: Option<BudgetHeader>,
    /// Budget lines.
    #[serde(default)]
    pub budget_lines: Vec<BudgetLine>,
    /// Known cost codes.
    #[serde(default)]
    pub cost_codes: Vec<CostCode>,
    /// Workers with current rates.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Actual cost rows, per source table or already uniform.
    #[serde(flatten)]
    pub rows: SourceRows,
}

impl ProjectData {
    fn into_input(self, project_id: ProjectId) -> ProjectRollupInput {
        ProjectRollupInput {
            project_id,
            budget_header: self.budget_header,
            budget_lines: self.budget_lines,
            cost_codes: self.cost_codes,
            workers: self.workers,
            rows: self.rows.into_rows(),
        }
    }
}

/// Request body for a project budget ledger.
#[derive(Debug, Deserialize)]
pub struct ProjectLedgerRequest {
    /// Project rows.
    #[serde(flatten)]
    pub data: ProjectData,
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

/// One project of a portfolio request.
#[derive(Debug, Deserialize)]
pub struct PortfolioProject {
    /// Project.
    pub project_id: ProjectId,
    /// Project rows.
    #[serde(flatten)]
    pub data: ProjectData,
}

/// Request body for a company portfolio rollup.
#[derive(Debug, Deserialize)]
pub struct PortfolioRequest {
    /// Projects to roll up.
    #[serde(default)]
    pub projects: Vec<PortfolioProject>,
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

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/projects/{project_id}/budget-ledger` - Budget vs actual for one project.
async fn project_ledger(
    State(state): State<AppState>,
    Path(project_id): Path<ProjectId>,
    Json(payload): Json<ProjectLedgerRequest>,
) -> Result<Json<ProjectRollup>, ApiError> {
    let range = date_range(payload.from, payload.to)?;
    let policy = payload
        .labor_rate_policy
        .unwrap_or(state.rollup.labor_rate_policy);
    let scope = RollupScope::project(project_id).with_range(range);

    let input = payload.data.into_input(project_id);
    let rollup = BudgetService::project_rollup(&input, &scope, policy)?;

    info!(
        project_id = %project_id,
        records = rollup.record_count,
        currency = %state.rollup.currency,
        "Budget ledger served"
    );
    Ok(Json(rollup))
}

/// POST `/companies/{company_id}/portfolio` - Budget vs actual for every project of a company.
async fn portfolio(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<PortfolioRequest>,
) -> Result<Json<PortfolioRollup>, ApiError> {
    let range = date_range(payload.from, payload.to)?;
    let policy = payload
        .labor_rate_policy
        .unwrap_or(state.rollup.labor_rate_policy);

    let inputs: Vec<ProjectRollupInput> = payload
        .projects
        .into_iter()
        .map(|project| project.data.into_input(project.project_id))
        .collect();

    let rollup = tokio::task::spawn_blocking(move || {
        BudgetService::portfolio_rollup(company_id, &inputs, range, policy)
    })
    .await??;

    Ok(Json(rollup))
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
    async fn test_project_ledger_over_budget_line() {
        let project = Uuid::now_v7();
        let budget = Uuid::now_v7();
        let code = Uuid::now_v7();

        let body = json!({
            "budget_header": { "id": budget, "project_id": project, "name": "Base" },
            "budget_lines": [{
                "id": Uuid::now_v7(),
                "budget_id": budget,
                "cost_code_id": code,
                "category": "labor",
                "description": "Electrical labor",
                "budget_amount": "5000"
            }],
            "cost_codes": [{ "id": code, "code": "ELEC-L", "name": "Electrical - Labor", "category": "labor" }],
            "cost_rows": [
                { "id": Uuid::now_v7(), "source": "misc", "project_id": project, "cost_code_id": code,
                  "category": "labor", "amount": "3000", "date": "2024-05-01" },
                { "id": Uuid::now_v7(), "source": "misc", "project_id": project, "cost_code_id": code,
                  "category": "labor", "amount": "3200", "date": "2024-05-02" }
            ]
        });

        let (status, body) = post_json(&format!("/api/v1/projects/{project}/budget-ledger"), &body).await;

        assert_eq!(status, StatusCode::OK);
        let line = &body["lines"][0];
        assert_eq!(line["code"], "ELEC-L");
        assert_eq!(dec_at(&line["budget_amount"]), dec!(5000));
        assert_eq!(dec_at(&line["actual_amount"]), dec!(6200));
        assert_eq!(dec_at(&line["variance"]), dec!(1200));
        assert_eq!(dec_at(&line["percent_used"]), dec!(124));
        assert_eq!(body["summary"]["status"], "unfavorable");
        assert_eq!(body["record_count"], 2);
    }

    #[tokio::test]
    async fn test_project_ledger_without_budget() {
        let project = Uuid::now_v7();
        let body = json!({
            "material_receipts": [{
                "id": Uuid::now_v7(), "project_id": project, "date": "2024-05-01", "amount": "300"
            }]
        });

        let (status, body) = post_json(&format!("/api/v1/projects/{project}/budget-ledger"), &body).await;

        assert_eq!(status, StatusCode::OK);
        let materials = &body["summary"]["materials"];
        assert_eq!(dec_at(&materials["budget"]), Decimal::ZERO);
        assert_eq!(dec_at(&materials["actual"]), dec!(300));
        assert_eq!(dec_at(&materials["variance"]), dec!(-300));
        assert_eq!(body["budget_id"], Value::Null);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let project = Uuid::now_v7();
        let body = json!({ "from": "2024-05-10", "to": "2024-05-01" });

        let (status, body) = post_json(&format!("/api/v1/projects/{project}/budget-ledger"), &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_portfolio_sums_projects() {
        let company = Uuid::now_v7();
        let projects: Vec<Value> = ["100", "250"]
            .iter()
            .map(|amount| {
                let project = Uuid::now_v7();
                json!({
                    "project_id": project,
                    "costs": [{
                        "id": Uuid::now_v7(), "project_id": project, "company_id": company,
                        "category": "equipment", "date": "2024-05-01", "amount": amount
                    }]
                })
            })
            .collect();

        let (status, body) = post_json(
            &format!("/api/v1/companies/{company}/portfolio"),
            &json!({ "projects": projects }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"].as_array().unwrap().len(), 2);
        assert_eq!(dec_at(&body["total_actual"]), dec!(350));
        assert_eq!(dec_at(&body["projects"][0]["summary"]["other"]["actual"]), dec!(100));
    }

    #[tokio::test]
    async fn test_overflowing_hours_are_rejected() {
        let project = Uuid::now_v7();
        let worker = Uuid::now_v7();
        let body = json!({
            "workers": [{ "id": worker, "name": "W", "hourly_rate": "2" }],
            "time_logs": [{
                "id": Uuid::now_v7(), "project_id": project, "worker_id": worker,
                "date": "2024-05-01", "hours_worked": "79228162514264337593543950335"
            }]
        });

        let (status, body) = post_json(&format!("/api/v1/projects/{project}/budget-ledger"), &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_portfolio_overflow_is_rejected() {
        let company = Uuid::now_v7();
        let projects: Vec<Value> = (0..2)
            .map(|_| {
                let project = Uuid::now_v7();
                json!({
                    "project_id": project,
                    "costs": [{
                        "id": Uuid::now_v7(), "project_id": project, "date": "2024-05-01",
                        "amount": "79228162514264337593543950335"
                    }]
                })
            })
            .collect();

        let (status, body) = post_json(
            &format!("/api/v1/companies/{company}/portfolio"),
            &json!({ "projects": projects }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
