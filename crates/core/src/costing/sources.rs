//! Store row shapes for each cost source.
//!
//! Each source table has its own columns; these convert into the uniform
//! [`RawCostRow`] the classifier consumes.

use buildledger_shared::types::{
    CompanyId, CostCodeId, CostRecordId, ProjectId, SubcontractorId, WorkerId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{CostSource, RawCostRow};

/// A `time_logs` / `daily_logs` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLogRow {
    /// Row ID.
    pub id: CostRecordId,
    /// Project.
    pub project_id: ProjectId,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Worker who logged the hours.
    pub worker_id: WorkerId,
    /// Cost code.
    #[serde(default)]
    pub cost_code_id: Option<CostCodeId>,
    /// Work date.
    pub date: NaiveDate,
    /// Hours worked.
    pub hours_worked: Decimal,
    /// Rate captured at entry, if the form stored one.
    #[serde(default)]
    pub hourly_rate_snapshot: Option<Decimal>,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A `sub_invoices` / `sub_payments` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubInvoiceRow {
    /// Row ID.
    pub id: CostRecordId,
    /// Project.
    pub project_id: ProjectId,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Subcontractor.
    #[serde(default)]
    pub subcontractor_id: Option<SubcontractorId>,
    /// Cost code.
    #[serde(default)]
    pub cost_code_id: Option<CostCodeId>,
    /// Invoice date.
    pub date: NaiveDate,
    /// Invoiced amount.
    pub amount: Decimal,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Invoice description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A `material_receipts` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialReceiptRow {
    /// Row ID.
    pub id: CostRecordId,
    /// Project.
    pub project_id: ProjectId,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Cost code.
    #[serde(default)]
    pub cost_code_id: Option<CostCodeId>,
    /// Receipt date.
    pub date: NaiveDate,
    /// Receipt total.
    pub amount: Decimal,
    /// Vendor or description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A `costs` row: miscellaneous spend with a free category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiscCostRow {
    /// Row ID.
    pub id: CostRecordId,
    /// Project.
    pub project_id: ProjectId,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Cost code.
    #[serde(default)]
    pub cost_code_id: Option<CostCodeId>,
    /// Stored category (`equipment`, `misc`, `materials`, ...).
    #[serde(default)]
    pub category: Option<String>,
    /// Cost date.
    pub date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<TimeLogRow> for RawCostRow {
    fn from(row: TimeLogRow) -> Self {
        Self {
            id: row.id,
            source: CostSource::Labor,
            project_id: row.project_id,
            company_id: row.company_id,
            cost_code_id: row.cost_code_id,
            category: Some(CostSource::Labor.default_category().as_str().to_string()),
            amount: None,
            hours: Some(row.hours_worked),
            worker_id: Some(row.worker_id),
            subcontractor_id: None,
            rate_snapshot: row.hourly_rate_snapshot,
            date: row.date,
            payment_status: row.payment_status,
            description: row.notes,
        }
    }
}

impl From<SubInvoiceRow> for RawCostRow {
    fn from(row: SubInvoiceRow) -> Self {
        Self {
            id: row.id,
            source: CostSource::Sub,
            project_id: row.project_id,
            company_id: row.company_id,
            cost_code_id: row.cost_code_id,
            category: Some(CostSource::Sub.default_category().as_str().to_string()),
            amount: Some(row.amount),
            hours: None,
            worker_id: None,
            subcontractor_id: row.subcontractor_id,
            rate_snapshot: None,
            date: row.date,
            payment_status: row.payment_status,
            description: row.description,
        }
    }
}

impl From<MaterialReceiptRow> for RawCostRow {
    fn from(row: MaterialReceiptRow) -> Self {
        Self {
            id: row.id,
            source: CostSource::Material,
            project_id: row.project_id,
            company_id: row.company_id,
            cost_code_id: row.cost_code_id,
            category: Some(CostSource::Material.default_category().as_str().to_string()),
            amount: Some(row.amount),
            hours: None,
            worker_id: None,
            subcontractor_id: None,
            rate_snapshot: None,
            date: row.date,
            payment_status: None,
            description: row.description,
        }
    }
}

impl From<MiscCostRow> for RawCostRow {
    fn from(row: MiscCostRow) -> Self {
        Self {
            id: row.id,
            source: CostSource::Misc,
            project_id: row.project_id,
            company_id: row.company_id,
            cost_code_id: row.cost_code_id,
            // The classifier maps a missing category to `other`.
            category: row.category,
            amount: Some(row.amount),
            hours: None,
            worker_id: None,
            subcontractor_id: None,
            rate_snapshot: None,
            date: row.date,
            payment_status: None,
            description: row.description,
        }
    }
}

/// Rows fetched from every source table for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRows {
    /// Labor time logs.
    pub time_logs: Vec<TimeLogRow>,
    /// Subcontractor invoices and payments.
    pub sub_invoices: Vec<SubInvoiceRow>,
    /// Materials receipts.
    pub material_receipts: Vec<MaterialReceiptRow>,
    /// Miscellaneous costs.
    pub costs: Vec<MiscCostRow>,
    /// Rows already in the uniform shape.
    pub cost_rows: Vec<RawCostRow>,
}

impl SourceRows {
    /// Flattens every source into uniform rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<RawCostRow> {
        let mut rows = Vec::with_capacity(
            self.time_logs.len()
                + self.sub_invoices.len()
                + self.material_receipts.len()
                + self.costs.len()
                + self.cost_rows.len(),
        );
        rows.extend(self.time_logs.into_iter().map(RawCostRow::from));
        rows.extend(self.sub_invoices.into_iter().map(RawCostRow::from));
        rows.extend(self.material_receipts.into_iter().map(RawCostRow::from));
        rows.extend(self.costs.into_iter().map(RawCostRow::from));
        rows.extend(self.cost_rows);
        rows
    }
}
