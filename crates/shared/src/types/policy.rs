//! Labor pricing policy.

use serde::{Deserialize, Serialize};

/// Which hourly rate prices a time log when labor actuals are aggregated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborRatePolicy {
    /// `hours * the worker's current rate`, read at aggregation time.
    ///
    /// Editing a worker's rate re-prices all of their historical time logs.
    #[default]
    CurrentWorkerRate,
    /// `hours * the rate captured on the time log when it was entered`.
    ///
    /// Falls back to the current rate for logs that carry no snapshot.
    SnapshotAtEntry,
}
