//! Cost code generation errors.

use buildledger_shared::types::TradeId;
use thiserror::Error;

/// Errors that can occur while generating cost codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostCodeError {
    /// Trade name has no letters or digits to build a prefix from.
    #[error("Trade {trade_id} has no usable name for a cost code prefix")]
    EmptyTradeName {
        /// The offending trade.
        trade_id: TradeId,
    },
}
