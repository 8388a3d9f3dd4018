//! Per-category yield multipliers.
//!
//! | Category   | Value                 | Factor |
//! |------------|-----------------------|--------|
//! | Soil       | loamy                 | 1.20   |
//! |            | clay                  | 1.00   |
//! |            | sandy, silty          | 0.90   |
//! | Irrigation | drip                  | 1.30   |
//! |            | sprinkler             | 1.10   |
//! |            | flood, rainfed        | 0.90   |
//! | Fertilizer | organic               | 1.15   |
//! |            | synthetic             | 1.25   |
//! |            | mixed, none           | 0.85   |
//! | Rainfall   | 30 <= inches <= 50    | 1.20   |
//! |            | inches > 50           | 1.00   |
//! |            | inches < 30           | 0.80   |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::within_inclusive;
use crate::models::{FarmInput, FertilizerUsage, IrrigationType, SoilType, YieldMultipliers};

/// Lower bound of the ideal rainfall band, in inches.
pub const IDEAL_RAINFALL_MIN: Decimal = dec!(30);

/// Upper bound of the ideal rainfall band, in inches.
pub const IDEAL_RAINFALL_MAX: Decimal = dec!(50);

pub fn soil_multiplier(soil: SoilType) -> Decimal {
    match soil {
        SoilType::Loamy => dec!(1.20),
        SoilType::Clay => dec!(1.00),
        SoilType::Sandy | SoilType::Silty => dec!(0.90),
    }
}

pub fn irrigation_multiplier(irrigation: IrrigationType) -> Decimal {
    match irrigation {
        IrrigationType::Drip => dec!(1.30),
        IrrigationType::Sprinkler => dec!(1.10),
        IrrigationType::Flood | IrrigationType::Rainfed => dec!(0.90),
    }
}

/// Mixed and no fertilizer share a factor.
pub fn fertilizer_multiplier(fertilizer: FertilizerUsage) -> Decimal {
    match fertilizer {
        FertilizerUsage::Organic => dec!(1.15),
        FertilizerUsage::Synthetic => dec!(1.25),
        FertilizerUsage::Mixed | FertilizerUsage::None => dec!(0.85),
    }
}

pub fn rainfall_multiplier(rainfall_inches: Decimal) -> Decimal {
    if within_inclusive(rainfall_inches, IDEAL_RAINFALL_MIN, IDEAL_RAINFALL_MAX) {
        dec!(1.20)
    } else if rainfall_inches > IDEAL_RAINFALL_MAX {
        dec!(1.00)
    } else {
        dec!(0.80)
    }
}

impl YieldMultipliers {
    /// Looks up every factor for `input`.
    pub fn for_input(input: &FarmInput) -> Self {
        Self {
            soil: soil_multiplier(input.soil_type),
            irrigation: irrigation_multiplier(input.irrigation_type),
            fertilizer: fertilizer_multiplier(input.fertilizer_usage),
            rainfall: rainfall_multiplier(input.annual_rainfall_inches),
        }
    }
}
