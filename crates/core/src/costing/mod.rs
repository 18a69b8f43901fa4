//! Cost classification and actual-cost aggregation.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod rates;
pub mod scope;
pub mod sources;
pub mod types;


pub use aggregator::{Actuals, CostAggregator};
pub use classifier::CostClassifier;
pub use error::{CostingError, CostingResult};
pub use rates::LaborRates;
pub use scope::RollupScope;
pub use sources::{MaterialReceiptRow, MiscCostRow, SourceRows, SubInvoiceRow, TimeLogRow};
pub use types::{
    ActualKey, Category, Classification, CostCode, CostRecord, CostSource, PaymentStatus,
    RawCostRow, Totals, Worker,
};
