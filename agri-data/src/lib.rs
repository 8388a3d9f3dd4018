//! Batch yield estimation over CSV files of farm records.

mod loader;
mod report;

pub use loader::{BatchError, FarmInputLoader, FarmRecord};
pub use report::{BatchEstimator, BatchSummary, LIST_SEPARATOR, ReportRow, write_report};
