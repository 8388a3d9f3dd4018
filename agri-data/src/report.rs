//! Batch estimation and the CSV report it produces.
//!
//! Every input record yields exactly one report row. Rows that fail
//! validation carry the validation message in the `error` column and leave
//! the estimate columns empty.

use std::io::Write;

use agri_core::{YieldEstimate, YieldEstimator, validate};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::loader::{BatchError, FarmRecord};

/// Separator used to flatten recommendation and risk lists into one cell.
pub const LIST_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// 1-based data row number; the header is row 0.
    pub row: usize,
    pub crop_type: String,
    pub predicted_yield_kg: Option<Decimal>,
    /// Formatted with one decimal place.
    pub confidence_percent: Option<String>,
    pub recommendations: String,
    pub risk_factors: String,
    pub error: Option<String>,
}

impl ReportRow {
    fn estimated(
        row: usize,
        crop_type: &str,
        estimate: &YieldEstimate,
    ) -> Self {
        Self {
            row,
            crop_type: crop_type.to_string(),
            predicted_yield_kg: Some(estimate.predicted_yield_kg),
            confidence_percent: Some(format!("{:.1}", estimate.confidence_percent)),
            recommendations: estimate.recommendations.join(LIST_SEPARATOR),
            risk_factors: estimate.risk_factors.join(LIST_SEPARATOR),
            error: None,
        }
    }

    fn rejected(
        row: usize,
        crop_type: &str,
        error: String,
    ) -> Self {
        Self {
            row,
            crop_type: crop_type.to_string(),
            predicted_yield_kg: None,
            confidence_percent: None,
            recommendations: String::new(),
            risk_factors: String::new(),
            error: Some(error),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Totals over a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub estimated: usize,
    pub rejected: usize,
    pub total_predicted_kg: Decimal,
}

impl BatchSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let rejected = rows.iter().filter(|row| row.is_rejected()).count();
        let total_predicted_kg = rows
            .iter()
            .filter_map(|row| row.predicted_yield_kg)
            .fold(Decimal::ZERO, |acc, kg| acc.saturating_add(kg));

        Self {
            rows: rows.len(),
            estimated: rows.len() - rejected,
            rejected,
            total_predicted_kg,
        }
    }
}

/// Runs the yield estimator over a list of CSV records.
pub struct BatchEstimator {
    estimator: YieldEstimator,
}

impl BatchEstimator {
    pub fn new() -> Self {
        Self::with_estimator(YieldEstimator::new())
    }

    pub fn with_estimator(estimator: YieldEstimator) -> Self {
        Self { estimator }
    }

    /// One report row per record, in input order. Never fails.
    pub fn run<R: Rng + ?Sized>(
        &self,
        records: &[FarmRecord],
        rng: &mut R,
    ) -> Vec<ReportRow> {
        let rows: Vec<ReportRow> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| self.estimate_row(idx + 1, record, rng))
            .collect();

        let summary = BatchSummary::from_rows(&rows);
        info!(
            rows = summary.rows,
            estimated = summary.estimated,
            rejected = summary.rejected,
            "batch estimate complete"
        );
        rows
    }

    fn estimate_row<R: Rng + ?Sized>(
        &self,
        row: usize,
        record: &FarmRecord,
        rng: &mut R,
    ) -> ReportRow {
        match validate(&record.to_draft()) {
            Ok(input) => {
                let estimate = self.estimator.estimate(&input, rng);
                ReportRow::estimated(row, input.crop_type.as_str(), &estimate)
            }
            Err(err) => {
                warn!(row, %err, "row rejected");
                ReportRow::rejected(row, &record.crop_type, err.to_string())
            }
        }
    }
}

impl Default for BatchEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `rows` as CSV, header first.
pub fn write_report<W: Write>(
    writer: W,
    rows: &[ReportRow],
) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
