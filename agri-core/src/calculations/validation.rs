//! Farm form validation.
//!
//! Turns a [`FarmInputDraft`] into a [`FarmInput`]. Fields are checked one at
//! a time in form order and the first failure is returned, so the caller
//! always has exactly one message to show.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{FarmInput, FarmInputDraft};

/// Reasons a draft cannot be estimated.
///
/// Messages are written for direct display next to the form.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Please select a crop type.")]
    MissingCropType,

    #[error("Please enter a valid land size greater than 0.")]
    InvalidLandSize,

    #[error("Please select a soil type.")]
    MissingSoilType,

    #[error("Please select an irrigation type.")]
    MissingIrrigationType,

    #[error("Please select fertilizer usage.")]
    MissingFertilizer,

    #[error("Please enter a valid annual rainfall.")]
    InvalidRainfall,
}

/// Validates a draft and returns the completed [`FarmInput`].
///
/// # Errors
///
/// Returns the first [`ValidationError`] in this order: crop type, land size
/// (must be > 0), soil type, irrigation type, fertilizer usage, rainfall
/// (must be >= 0). `previous_yield_kg` is copied through without checks.
pub fn validate(draft: &FarmInputDraft) -> Result<FarmInput, ValidationError> {
    let result = check(draft);
    if let Err(error) = &result {
        debug!(?error, "farm input rejected");
    }
    result
}

fn check(draft: &FarmInputDraft) -> Result<FarmInput, ValidationError> {
    let crop_type = draft.crop_type.ok_or(ValidationError::MissingCropType)?;

    let land_size_acres = draft
        .land_size_acres
        .filter(|acres| *acres > Decimal::ZERO)
        .ok_or(ValidationError::InvalidLandSize)?;

    let soil_type = draft.soil_type.ok_or(ValidationError::MissingSoilType)?;

    let irrigation_type = draft
        .irrigation_type
        .ok_or(ValidationError::MissingIrrigationType)?;

    let fertilizer_usage = draft
        .fertilizer_usage
        .ok_or(ValidationError::MissingFertilizer)?;

    let annual_rainfall_inches = draft
        .annual_rainfall_inches
        .filter(|inches| *inches >= Decimal::ZERO)
        .ok_or(ValidationError::InvalidRainfall)?;

    Ok(FarmInput {
        crop_type,
        land_size_acres,
        soil_type,
        irrigation_type,
        fertilizer_usage,
        annual_rainfall_inches,
        previous_yield_kg: draft.previous_yield_kg,
    })
}
