//! Crop yield estimator.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base yield: land size (acres) × 2,500 kg |
//! | 2    | Look up soil, irrigation, fertilizer and rainfall multipliers |
//! | 3    | Predicted yield: step 1 × all four multipliers, rounded to whole kg |
//! | 4    | Confidence: 70% plus a uniform draw from [0, 20), capped at 95% |
//! | 5    | Recommendations and risk factors from the advisory rules |
//!
//! Steps 1–3 and 5 are deterministic. Step 4 is a display value only and
//! draws from the random source the caller passes in.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rust_decimal_macros::dec;
//! use agri_core::calculations::{YieldEstimator, validate};
//! use agri_core::{CropType, FarmInputDraft, FertilizerUsage, IrrigationType, SoilType};
//!
//! let draft = FarmInputDraft {
//!     crop_type: Some(CropType::Tomatoes),
//!     land_size_acres: Some(dec!(10)),
//!     soil_type: Some(SoilType::Loamy),
//!     irrigation_type: Some(IrrigationType::Drip),
//!     fertilizer_usage: Some(FertilizerUsage::Synthetic),
//!     annual_rainfall_inches: Some(dec!(35)),
//!     previous_yield_kg: None,
//! };
//!
//! let input = validate(&draft).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let estimate = YieldEstimator::new().estimate(&input, &mut rng);
//!
//! assert_eq!(estimate.base_yield_kg, dec!(25000));
//! assert_eq!(estimate.predicted_yield_kg, dec!(58500));
//! assert!(estimate.risk_factors.is_empty());
//! ```

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::calculations::advisory::{Advisory, AdvisoryRule, default_rules};
use crate::calculations::common::round_half_up;
use crate::models::{FarmInput, YieldEstimate, YieldMultipliers};

/// Expected harvest per acre before any adjustment, in kilograms.
pub const BASE_YIELD_KG_PER_ACRE: Decimal = dec!(2500);

/// Lowest confidence figure that can be reported.
pub const CONFIDENCE_FLOOR: f64 = 70.0;

/// Width of the range the confidence figure is drawn from.
pub const CONFIDENCE_SPREAD: f64 = 20.0;

/// Hard cap on the confidence figure.
pub const CONFIDENCE_CEILING: f64 = 95.0;

/// Calculator for crop yield estimates.
///
/// Holds the advisory rule set; the numeric part of the estimate is fixed.
pub struct YieldEstimator {
    rules: Vec<Box<dyn AdvisoryRule>>,
}

impl YieldEstimator {
    /// Creates an estimator with the standard advisory rules.
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Creates an estimator with a custom advisory rule set.
    pub fn with_rules(rules: Vec<Box<dyn AdvisoryRule>>) -> Self {
        Self { rules }
    }

    /// Produces a [`YieldEstimate`] for a validated input.
    ///
    /// Never fails. Two calls with the same input agree on everything
    /// except `confidence_percent`.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        input: &FarmInput,
        rng: &mut R,
    ) -> YieldEstimate {
        let base_yield_kg = self.base_yield(input.land_size_acres);
        let multipliers = YieldMultipliers::for_input(input);
        debug!(
            soil = %multipliers.soil,
            irrigation = %multipliers.irrigation,
            fertilizer = %multipliers.fertilizer,
            rainfall = %multipliers.rainfall,
            "applying yield multipliers"
        );

        let predicted_yield_kg = self.predicted_yield(base_yield_kg, &multipliers);
        let confidence_percent = self.confidence(rng);
        let advisory = Advisory::derive(input, &self.rules);

        info!(
            crop = input.crop_type.as_str(),
            predicted_kg = %predicted_yield_kg,
            recommendations = advisory.recommendations.len(),
            risks = advisory.risk_factors.len(),
            "yield estimate complete"
        );

        YieldEstimate {
            base_yield_kg,
            multipliers,
            predicted_yield_kg,
            confidence_percent,
            recommendations: advisory.recommendations,
            risk_factors: advisory.risk_factors,
        }
    }

    /// Land size times the per-acre base rate.
    fn base_yield(
        &self,
        land_size_acres: Decimal,
    ) -> Decimal {
        land_size_acres.saturating_mul(BASE_YIELD_KG_PER_ACRE)
    }

    /// Base yield adjusted by every multiplier, rounded to whole kilograms.
    fn predicted_yield(
        &self,
        base_yield_kg: Decimal,
        multipliers: &YieldMultipliers,
    ) -> Decimal {
        let adjusted = base_yield_kg
            .saturating_mul(multipliers.soil)
            .saturating_mul(multipliers.irrigation)
            .saturating_mul(multipliers.fertilizer)
            .saturating_mul(multipliers.rainfall);
        round_half_up(adjusted, 0)
    }

    fn confidence<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> f64 {
        let draw = rng.gen_range(0.0..CONFIDENCE_SPREAD);
        (CONFIDENCE_FLOOR + draw).min(CONFIDENCE_CEILING)
    }
}

impl Default for YieldEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Estimates with the standard rule set.
pub fn estimate<R: Rng + ?Sized>(
    input: &FarmInput,
    rng: &mut R,
) -> YieldEstimate {
    YieldEstimator::new().estimate(input, rng)
}
