use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CropType, FertilizerUsage, IrrigationType, SoilType};

/// A validated farm record, ready for estimation.
///
/// Only [`crate::calculations::validate`] builds one from user input, so every
/// value here already satisfies the form constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmInput {
    pub crop_type: CropType,
    /// Cultivated area in acres, always greater than zero.
    pub land_size_acres: Decimal,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,
    pub fertilizer_usage: FertilizerUsage,
    /// Annual rainfall in inches, never negative.
    pub annual_rainfall_inches: Decimal,
    /// Last season's harvest in kilograms.
    /// Collected by the form but not part of the yield formula.
    pub previous_yield_kg: Option<Decimal>,
}

/// Form values after string coercion, before validation.
///
/// A `None` field is either missing or could not be coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmInputDraft {
    pub crop_type: Option<CropType>,
    pub land_size_acres: Option<Decimal>,
    pub soil_type: Option<SoilType>,
    pub irrigation_type: Option<IrrigationType>,
    pub fertilizer_usage: Option<FertilizerUsage>,
    pub annual_rainfall_inches: Option<Decimal>,
    pub previous_yield_kg: Option<Decimal>,
}

impl From<FarmInput> for FarmInputDraft {
    fn from(input: FarmInput) -> Self {
        Self {
            crop_type: Some(input.crop_type),
            land_size_acres: Some(input.land_size_acres),
            soil_type: Some(input.soil_type),
            irrigation_type: Some(input.irrigation_type),
            fertilizer_usage: Some(input.fertilizer_usage),
            annual_rainfall_inches: Some(input.annual_rainfall_inches),
            previous_yield_kg: input.previous_yield_kg,
        }
    }
}
