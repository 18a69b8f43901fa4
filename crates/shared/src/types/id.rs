//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `WorkerId` where a `ProjectId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(CompanyId, "Unique identifier for a company.");
typed_id!(ProjectId, "Unique identifier for a construction project.");
typed_id!(WorkerId, "Unique identifier for a worker.");
typed_id!(SubcontractorId, "Unique identifier for a subcontractor.");
typed_id!(TradeId, "Unique identifier for a trade.");
typed_id!(CostCodeId, "Unique identifier for a cost code.");
typed_id!(BudgetId, "Unique identifier for a project budget header.");
typed_id!(BudgetLineId, "Unique identifier for a budget line.");
typed_id!(
    CostRecordId,
    "Unique identifier for an actual cost row (time log, invoice, receipt, misc cost)."
);
typed_id!(AssignmentId, "Unique identifier for a schedule assignment.");
