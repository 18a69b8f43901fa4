//! Cost classification.
//!
//! Maps each raw row to a canonical `(category, cost_code)` pair. Missing or
//! dangling cost codes never block aggregation: they classify as unassigned.

use std::collections::HashMap;

use buildledger_shared::types::CostCodeId;
use tracing::debug;

use super::types::{Category, Classification, CostCode, CostRecord, RawCostRow};

/// Classifier over a fixed set of known cost codes.
pub struct CostClassifier<'a> {
    codes: HashMap<CostCodeId, &'a CostCode>,
}

impl<'a> CostClassifier<'a> {
    /// Indexes the known cost codes by ID.
    #[must_use]
    pub fn new(cost_codes: &'a [CostCode]) -> Self {
        Self {
            codes: cost_codes.iter().map(|code| (code.id, code)).collect(),
        }
    }

    /// Looks up a cost code.
    #[must_use]
    pub fn cost_code(&self, id: CostCodeId) -> Option<&'a CostCode> {
        self.codes.get(&id).copied()
    }

    /// Classifies one row.
    ///
    /// The category comes from the row's own category string; the cost code is
    /// kept only when it resolves to a known code.
    #[must_use]
    pub fn classify(&self, row: &RawCostRow) -> Classification {
        let category = Category::normalize(row.category.as_deref());

        let cost_code_id = row.cost_code_id.filter(|id| {
            let known = self.codes.contains_key(id);
            if !known {
                debug!(
                    record_id = %row.id,
                    cost_code_id = %id,
                    "Unknown cost code, classifying as unassigned"
                );
            }
            known
        });

        Classification {
            category,
            cost_code_id,
        }
    }

    /// Classifies every row, preserving input order.
    #[must_use]
    pub fn classify_all<'r, I>(&self, rows: I) -> Vec<CostRecord>
    where
        I: IntoIterator<Item = &'r RawCostRow>,
    {
        rows.into_iter()
            .map(|row| CostRecord::from_row(row, self.classify(row)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::types::CostSource;
    use buildledger_shared::types::ProjectId;
    use chrono::NaiveDate;

    fn code(category: Category) -> CostCode {
        CostCode {
            id: CostCodeId::new(),
            code: "ELEC-L".to_string(),
            name: "Electrical - Labor".to_string(),
            category,
            trade_id: None,
        }
    }

    fn row(category: Option<&str>, cost_code_id: Option<CostCodeId>) -> RawCostRow {
        let mut row = RawCostRow::new(
            CostSource::Misc,
            ProjectId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        row.category = category.map(str::to_string);
        row.cost_code_id = cost_code_id;
        row
    }

    #[test]
    fn test_known_cost_code_is_kept() {
        let codes = vec![code(Category::Labor)];
        let classifier = CostClassifier::new(&codes);

        let result = classifier.classify(&row(Some("labor"), Some(codes[0].id)));

        assert_eq!(result.category, Category::Labor);
        assert_eq!(result.cost_code_id, Some(codes[0].id));
    }

    #[test]
    fn test_dangling_cost_code_becomes_unassigned() {
        let codes = vec![code(Category::Labor)];
        let classifier = CostClassifier::new(&codes);

        let result = classifier.classify(&row(Some("materials"), Some(CostCodeId::new())));

        assert_eq!(result.category, Category::Materials);
        assert_eq!(result.cost_code_id, None);
    }

    #[test]
    fn test_null_category_is_other() {
        let classifier = CostClassifier::new(&[]);

        let result = classifier.classify(&row(None, None));

        assert_eq!(result.category, Category::Other);
        assert_eq!(result.cost_code_id, None);
    }

    #[test]
    fn test_classify_all_reads_payment_status() {
        let classifier = CostClassifier::new(&[]);
        let mut paid = row(Some("sub"), None);
        paid.payment_status = Some("paid".to_string());
        let unknown = row(Some("sub"), None);

        let records = classifier.classify_all(&[paid, unknown]);

        assert_eq!(records.len(), 2);
        assert!(records[0].payment_status.is_paid());
        assert!(!records[1].payment_status.is_paid());
        assert_eq!(records[0].category, Category::Subs);
    }
}
