//! Cost data types.

use buildledger_shared::types::{
    CompanyId, CostCodeId, CostRecordId, ProjectId, SubcontractorId, TradeId, WorkerId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::error::{CostingResult, checked_sum};

/// Canonical cost bucket.
///
/// Variants are declared in alphabetical order of their names so the derived
/// `Ord` sorts ledgers alphabetically by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum Category {
    /// Crew time priced from worker rates.
    Labor,
    /// Materials receipts.
    Materials,
    /// Equipment, miscellaneous, and anything unrecognized.
    Other,
    /// Subcontractor invoices and payments.
    Subs,
}

impl Category {
    /// All categories in summary order.
    pub const ALL: [Self; 4] = [Self::Labor, Self::Subs, Self::Materials, Self::Other];

    /// Collapses a source-specific category string into a canonical bucket.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unrecognized and missing values land in `Other`.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Other;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "labor" | "labour" => Self::Labor,
            "subs" | "sub" | "subcontractor" | "subcontractors" => Self::Subs,
            "materials" | "material" => Self::Materials,
            _ => Self::Other,
        }
    }

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Labor => "labor",
            Self::Materials => "materials",
            Self::Other => "other",
            Self::Subs => "subs",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Labor => "Labor",
            Self::Materials => "Materials",
            Self::Other => "Other",
            Self::Subs => "Subcontractors",
        }
    }
}

impl From<Option<String>> for Category {
    fn from(raw: Option<String>) -> Self {
        Self::normalize(raw.as_deref())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an actual cost row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    /// Time log / daily log hours.
    Labor,
    /// Subcontractor invoice or payment.
    #[serde(alias = "subs")]
    Sub,
    /// Materials receipt.
    #[serde(alias = "materials")]
    Material,
    /// Miscellaneous project cost.
    Misc,
}

impl CostSource {
    /// Category a row of this source belongs to when the store row carries none.
    #[must_use]
    pub const fn default_category(self) -> Category {
        match self {
            Self::Labor => Category::Labor,
            Self::Sub => Category::Subs,
            Self::Material => Category::Materials,
            Self::Misc => Category::Other,
        }
    }

    /// Whether rows of this source carry a payment status that matters.
    #[must_use]
    pub const fn is_payable(self) -> bool {
        matches!(self, Self::Labor | Self::Sub)
    }
}

/// Payment status of a labor or subcontractor cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Settled.
    Paid,
    /// Outstanding.
    Unpaid,
}

impl PaymentStatus {
    /// Reads a stored status. Only the literal `"paid"` counts as paid; missing
    /// and unrecognized values are unpaid so owed money is never hidden.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("paid") => Self::Paid,
            _ => Self::Unpaid,
        }
    }

    /// Returns true for `Paid`.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

/// A cost code: the join key between budget lines and actuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCode {
    /// Cost code ID.
    pub id: CostCodeId,
    /// Short code, e.g. `ELEC-L`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Stored category.
    pub category: Category,
    /// Trade the code was generated for.
    #[serde(default)]
    pub trade_id: Option<TradeId>,
}

/// A worker as far as labor pricing is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Worker ID.
    pub id: WorkerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Employing company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Current hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

/// An actual cost row as returned by the data store, before classification.
///
/// Every foreign key is optional and category/status are free strings: the
/// classifier decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCostRow {
    /// Row ID in its source table.
    pub id: CostRecordId,
    /// Source table.
    pub source: CostSource,
    /// Project the cost was booked to.
    pub project_id: ProjectId,
    /// Company owning the project.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Cost code, possibly dangling.
    #[serde(default)]
    pub cost_code_id: Option<CostCodeId>,
    /// Source-specific category string.
    #[serde(default)]
    pub category: Option<String>,
    /// Monetary amount; labor rows are normally priced from hours instead.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Hours worked.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Worker for labor rows.
    #[serde(default)]
    pub worker_id: Option<WorkerId>,
    /// Subcontractor for sub rows.
    #[serde(default)]
    pub subcontractor_id: Option<SubcontractorId>,
    /// Hourly rate captured when the time log was entered.
    #[serde(default)]
    pub rate_snapshot: Option<Decimal>,
    /// Date the cost was incurred.
    pub date: NaiveDate,
    /// Stored payment status string.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl RawCostRow {
    /// Creates a row with only the required fields set.
    #[must_use]
    pub fn new(source: CostSource, project_id: ProjectId, date: NaiveDate) -> Self {
        Self {
            id: CostRecordId::new(),
            source,
            project_id,
            company_id: None,
            cost_code_id: None,
            category: Some(source.default_category().as_str().to_string()),
            amount: None,
            hours: None,
            worker_id: None,
            subcontractor_id: None,
            rate_snapshot: None,
            date,
            payment_status: None,
            description: None,
        }
    }
}

/// Result of classifying a raw row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Canonical category.
    pub category: Category,
    /// Cost code, `None` when missing or unresolvable.
    pub cost_code_id: Option<CostCodeId>,
}

/// A classified actual cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostRecord {
    /// Row ID in its source table.
    pub id: CostRecordId,
    /// Source table.
    pub source: CostSource,
    /// Project the cost was booked to.
    pub project_id: ProjectId,
    /// Company owning the project, when the row carried it.
    pub company_id: Option<CompanyId>,
    /// Resolved cost code.
    pub cost_code_id: Option<CostCodeId>,
    /// Canonical category.
    pub category: Category,
    /// Stored amount.
    pub amount: Option<Decimal>,
    /// Hours worked.
    pub hours: Option<Decimal>,
    /// Worker for labor rows.
    pub worker_id: Option<WorkerId>,
    /// Subcontractor for sub rows.
    pub subcontractor_id: Option<SubcontractorId>,
    /// Hourly rate captured at entry.
    pub rate_snapshot: Option<Decimal>,
    /// Date the cost was incurred.
    pub date: NaiveDate,
    /// Payment status with unknown values read as unpaid.
    pub payment_status: PaymentStatus,
}

impl CostRecord {
    /// Combines a raw row with its classification.
    #[must_use]
    pub fn from_row(row: &RawCostRow, classification: Classification) -> Self {
        Self {
            id: row.id,
            source: row.source,
            project_id: row.project_id,
            company_id: row.company_id,
            cost_code_id: classification.cost_code_id,
            category: classification.category,
            amount: row.amount,
            hours: row.hours,
            worker_id: row.worker_id,
            subcontractor_id: row.subcontractor_id,
            rate_snapshot: row.rate_snapshot,
            date: row.date,
            payment_status: PaymentStatus::from_raw(row.payment_status.as_deref()),
        }
    }

    /// Hours on the record, zero when absent.
    #[must_use]
    pub fn hours_or_zero(&self) -> Decimal {
        self.hours.unwrap_or(Decimal::ZERO)
    }
}

/// Ledger key for aggregated actuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActualKey {
    /// Costs booked to a known cost code.
    CostCode(CostCodeId),
    /// Costs without a resolvable cost code, kept apart per category.
    Unassigned(Category),
}

impl std::fmt::Display for ActualKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CostCode(id) => write!(f, "{id}"),
            Self::Unassigned(category) => write!(f, "unassigned:{category}"),
        }
    }
}

impl Serialize for ActualKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accumulated amount and hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Monetary amount.
    pub amount: Decimal,
    /// Hours.
    pub hours: Decimal,
}

impl Totals {
    /// Creates totals from an amount and hours.
    #[must_use]
    pub const fn new(amount: Decimal, hours: Decimal) -> Self {
        Self { amount, hours }
    }

    /// Adds one contribution.
    ///
    /// Leaves the totals untouched when either sum overflows.
    pub fn add(&mut self, amount: Decimal, hours: Decimal) -> CostingResult<()> {
        let amount = checked_sum(self.amount, amount, "summing amounts")?;
        let hours = checked_sum(self.hours, hours, "summing hours")?;
        self.amount = amount;
        self.hours = hours;
        Ok(())
    }
}
