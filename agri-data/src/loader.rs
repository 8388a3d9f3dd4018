//! CSV loader for farm input rows.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around every value is trimmed.
//!
//! | Column | Required | Type | Notes |
//! |--------------------------|----------|---------|-----------------------------------------------|
//! | `crop_type` | yes | string | `wheat`, `corn`, `rice`, `soybeans`, `tomatoes`, `cotton` |
//! | `land_size_acres` | yes | decimal | Must be greater than zero |
//! | `soil_type` | yes | string | `loamy`, `clay`, `sandy`, `silty` |
//! | `irrigation_type` | yes | string | `drip`, `sprinkler`, `flood`, `rainfed` |
//! | `fertilizer_usage` | yes | string | `organic`, `synthetic`, `mixed`, `none` |
//! | `annual_rainfall_inches` | yes | decimal | Must not be negative |
//! | `previous_yield_kg` | no | decimal | Column may be left out entirely |
//!
//! A required column must be present in the header. Its cells may still be
//! empty or malformed: such a cell becomes a missing value and the row is
//! rejected later by validation, not here.
//!
//! ### Example
//!
//! ```csv
//! crop_type,land_size_acres,soil_type,irrigation_type,fertilizer_usage,annual_rainfall_inches
//! tomatoes,10,loamy,drip,synthetic,35
//! ```

use std::io::Read;

use agri_core::{CropType, FarmInputDraft, FertilizerUsage, IrrigationType, SoilType};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors that stop a batch run as a whole.
///
/// Per-row problems are not errors here; they end up in the report.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::CsvParse(err.to_string())
    }
}

/// One row of the farm input CSV, before any coercion.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FarmRecord {
    #[serde(deserialize_with = "deserialize_text")]
    pub crop_type: String,
    #[serde(deserialize_with = "deserialize_lenient_decimal")]
    pub land_size_acres: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_text")]
    pub soil_type: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub irrigation_type: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub fertilizer_usage: String,
    #[serde(deserialize_with = "deserialize_lenient_decimal")]
    pub annual_rainfall_inches: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub previous_yield_kg: Option<Decimal>,
}

impl FarmRecord {
    /// Coerces the option columns into a draft. Unknown values become `None`.
    pub fn to_draft(&self) -> FarmInputDraft {
        FarmInputDraft {
            crop_type: coerce_option("crop_type", &self.crop_type, CropType::parse),
            land_size_acres: self.land_size_acres,
            soil_type: coerce_option("soil_type", &self.soil_type, SoilType::parse),
            irrigation_type: coerce_option(
                "irrigation_type",
                &self.irrigation_type,
                IrrigationType::parse,
            ),
            fertilizer_usage: coerce_option(
                "fertilizer_usage",
                &self.fertilizer_usage,
                FertilizerUsage::parse,
            ),
            annual_rainfall_inches: self.annual_rainfall_inches,
            previous_yield_kg: self.previous_yield_kg,
        }
    }
}

fn coerce_option<T>(
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    if value.trim().is_empty() {
        return None;
    }
    let parsed = parse(value);
    if parsed.is_none() {
        warn!(column, value, "unrecognised option value");
    }
    parsed
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.unwrap_or_default())
}

/// Empty cells are `None`. So are cells that do not parse, with a warning,
/// because the row still has to show up in the report.
fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.as_deref().and_then(parse_cell_decimal))
}

fn parse_cell_decimal(cell: &str) -> Option<Decimal> {
    let normalized = cell.trim().replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().map_or_else(
        |e| {
            warn!(input = %cell, "invalid decimal cell: {}", e);
            None
        },
        Some,
    )
}

/// Reads farm records from CSV.
pub struct FarmInputLoader;

impl FarmInputLoader {
    /// Parses every record from `reader`, in file order.
    ///
    /// # Errors
    ///
    /// [`BatchError::CsvParse`] if the CSV is structurally invalid, for
    /// instance a required header is missing or a row has the wrong number
    /// of fields.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<FarmRecord>, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: FarmRecord = result?;
            records.push(record);
        }

        Ok(records)
    }
}
