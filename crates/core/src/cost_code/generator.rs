//! Cost code generator.
//!
//! Each trade gets one code per category: `<PREFIX>-<L|S|M|O>`, where the
//! prefix is the first four letters or digits of the trade name.

use std::collections::{HashMap, HashSet};

use buildledger_shared::types::{CostCodeId, TradeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CostCodeError;
use crate::costing::{Category, CostCode};

const PREFIX_LEN: usize = 4;

/// A construction trade (electrical, plumbing, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade ID.
    pub id: TradeId,
    /// Trade name.
    pub name: String,
}

/// Generates standard cost codes for trades.
pub struct CostCodeGenerator;

impl CostCodeGenerator {
    /// Codes missing for `trades`, given the `existing` ones.
    ///
    /// A trade that already owns codes keeps its prefix. Prefixes taken by
    /// another trade get a numeric suffix (`ELEC`, `ELEC2`, ...). Codes whose
    /// text already exists, ignoring case, are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CostCodeError::EmptyTradeName` if a trade name has no letters
    /// or digits.
    pub fn generate(
        trades: &[Trade],
        existing: &[CostCode],
    ) -> Result<Vec<CostCode>, CostCodeError> {
        let mut taken_codes: HashSet<String> = existing
            .iter()
            .map(|code| code.code.to_ascii_uppercase())
            .collect();

        let mut prefix_owner: HashMap<String, Option<TradeId>> = HashMap::new();
        let mut trade_prefix: HashMap<TradeId, String> = HashMap::new();
        for code in existing {
            let Some((prefix, _)) = code.code.rsplit_once('-') else {
                continue;
            };
            let prefix = prefix.to_ascii_uppercase();
            if let Some(trade_id) = code.trade_id {
                trade_prefix.entry(trade_id).or_insert_with(|| prefix.clone());
            }
            prefix_owner.entry(prefix).or_insert(code.trade_id);
        }

        let mut generated = Vec::new();
        for trade in trades {
            let prefix = match trade_prefix.get(&trade.id) {
                Some(prefix) => prefix.clone(),
                None => {
                    let prefix = Self::free_prefix(trade, &prefix_owner)?;
                    prefix_owner.insert(prefix.clone(), Some(trade.id));
                    trade_prefix.insert(trade.id, prefix.clone());
                    prefix
                }
            };

            for category in Category::ALL {
                let code = format!("{prefix}-{}", Self::suffix(category));
                if !taken_codes.insert(code.to_ascii_uppercase()) {
                    continue;
                }
                generated.push(CostCode {
                    id: CostCodeId::new(),
                    code,
                    name: format!("{} - {}", trade.name.trim(), category.label()),
                    category,
                    trade_id: Some(trade.id),
                });
            }
        }

        debug!(
            trades = trades.len(),
            generated = generated.len(),
            "Cost codes generated"
        );
        Ok(generated)
    }

    /// Base prefix of a trade name: its first four letters or digits, uppercased.
    #[must_use]
    pub fn base_prefix(name: &str) -> String {
        name.chars()
            .filter(char::is_ascii_alphanumeric)
            .take(PREFIX_LEN)
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    /// Single-letter suffix of a category.
    #[must_use]
    pub const fn suffix(category: Category) -> char {
        match category {
            Category::Labor => 'L',
            Category::Subs => 'S',
            Category::Materials => 'M',
            Category::Other => 'O',
        }
    }

    fn free_prefix(
        trade: &Trade,
        owners: &HashMap<String, Option<TradeId>>,
    ) -> Result<String, CostCodeError> {
        let base = Self::base_prefix(&trade.name);
        if base.is_empty() {
            return Err(CostCodeError::EmptyTradeName { trade_id: trade.id });
        }

        let mut candidate = base.clone();
        let mut n = 2u32;
        while owners
            .get(&candidate)
            .is_some_and(|owner| *owner != Some(trade.id))
        {
            candidate = format!("{base}{n}");
            n += 1;
        }
        Ok(candidate)
    }
}
