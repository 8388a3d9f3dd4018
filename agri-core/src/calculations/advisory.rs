//! Advisory rules for yield estimates.
//!
//! Each rule looks at the raw [`FarmInput`] (never at the multipliers) and
//! may contribute one recommendation and one risk factor. Rules are
//! independent and additive; their output is appended in rule-set order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{FarmInput, FertilizerUsage, IrrigationType, SoilType};

/// Rainfall below this many inches triggers the water conservation advice.
pub const LOW_RAINFALL_THRESHOLD: Decimal = dec!(25);

/// Rainfall above this many inches triggers the drainage advice.
pub const HIGH_RAINFALL_THRESHOLD: Decimal = dec!(60);

/// Recommendations used when no rule contributed one.
pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Current farming practices are well-optimized",
    "Continue monitoring soil health regularly",
];

/// Output of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub recommendation: Option<&'static str>,
    pub risk_factor: Option<&'static str>,
}

pub trait AdvisoryRule: Send + Sync {
    fn id(&self) -> &'static str;

    fn evaluate(
        &self,
        input: &FarmInput,
    ) -> Option<Advice>;
}

/// Collected advisory text for one estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl Advisory {
    /// Runs `rules` in order against `input`.
    ///
    /// Falls back to [`FALLBACK_RECOMMENDATIONS`] when no rule recommended
    /// anything, so `recommendations` is never empty.
    pub fn derive(
        input: &FarmInput,
        rules: &[Box<dyn AdvisoryRule>],
    ) -> Self {
        let mut advisory = Self::default();

        for rule in rules {
            let Some(advice) = rule.evaluate(input) else {
                continue;
            };
            debug!(rule = rule.id(), "advisory rule fired");
            if let Some(text) = advice.recommendation {
                advisory.recommendations.push(text.to_string());
            }
            if let Some(text) = advice.risk_factor {
                advisory.risk_factors.push(text.to_string());
            }
        }

        if advisory.recommendations.is_empty() {
            advisory.recommendations = FALLBACK_RECOMMENDATIONS
                .iter()
                .map(|text| text.to_string())
                .collect();
        }

        advisory
    }
}

/// The standard rule set, in evaluation order.
pub fn default_rules() -> Vec<Box<dyn AdvisoryRule>> {
    vec![
        Box::new(FloodIrrigationRule),
        Box::new(SandySoilRule),
        Box::new(LowRainfallRule),
        Box::new(NoFertilizerRule),
        Box::new(ExcessRainfallRule),
    ]
}

pub struct FloodIrrigationRule;

impl AdvisoryRule for FloodIrrigationRule {
    fn id(&self) -> &'static str {
        "flood_irrigation"
    }

    fn evaluate(
        &self,
        input: &FarmInput,
    ) -> Option<Advice> {
        (input.irrigation_type == IrrigationType::Flood).then_some(Advice {
            recommendation: Some(
                "Consider upgrading to drip irrigation for 30% better water efficiency",
            ),
            risk_factor: None,
        })
    }
}

pub struct SandySoilRule;

impl AdvisoryRule for SandySoilRule {
    fn id(&self) -> &'static str {
        "sandy_soil"
    }

    fn evaluate(
        &self,
        input: &FarmInput,
    ) -> Option<Advice> {
        (input.soil_type == SoilType::Sandy).then_some(Advice {
            recommendation: Some("Add organic matter to improve soil water retention"),
            risk_factor: Some("Sandy soil may require more frequent irrigation"),
        })
    }
}

pub struct LowRainfallRule;

impl AdvisoryRule for LowRainfallRule {
    fn id(&self) -> &'static str {
        "low_rainfall"
    }

    fn evaluate(
        &self,
        input: &FarmInput,
    ) -> Option<Advice> {
        (input.annual_rainfall_inches < LOW_RAINFALL_THRESHOLD).then_some(Advice {
            recommendation: Some("Implement water conservation techniques due to low rainfall"),
            risk_factor: Some("Below-average rainfall may impact yield"),
        })
    }
}

pub struct NoFertilizerRule;

impl AdvisoryRule for NoFertilizerRule {
    fn id(&self) -> &'static str {
        "no_fertilizer"
    }

    fn evaluate(
        &self,
        input: &FarmInput,
    ) -> Option<Advice> {
        (input.fertilizer_usage == FertilizerUsage::None).then_some(Advice {
            recommendation: Some("Apply balanced NPK fertilizer to improve yield"),
            risk_factor: Some("Lack of fertilization may significantly reduce yield"),
        })
    }
}

pub struct ExcessRainfallRule;

impl AdvisoryRule for ExcessRainfallRule {
    fn id(&self) -> &'static str {
        "excess_rainfall"
    }

    fn evaluate(
        &self,
        input: &FarmInput,
    ) -> Option<Advice> {
        (input.annual_rainfall_inches > HIGH_RAINFALL_THRESHOLD).then_some(Advice {
            recommendation: Some("Ensure proper drainage systems are in place"),
            risk_factor: Some("Excess rainfall may cause waterlogging issues"),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::CropType;

    fn optimal_input() -> FarmInput {
        FarmInput {
            crop_type: CropType::Tomatoes,
            land_size_acres: dec!(10),
            soil_type: SoilType::Loamy,
            irrigation_type: IrrigationType::Drip,
            fertilizer_usage: FertilizerUsage::Synthetic,
            annual_rainfall_inches: dec!(35),
            previous_yield_kg: None,
        }
    }

    #[test]
    fn no_triggers_gives_fallback_recommendations() {
        let advisory = Advisory::derive(&optimal_input(), &default_rules());

        assert_eq!(
            advisory.recommendations,
            vec![
                "Current farming practices are well-optimized".to_string(),
                "Continue monitoring soil health regularly".to_string(),
            ]
        );
        assert!(advisory.risk_factors.is_empty());
    }

    #[test]
    fn flood_irrigation_adds_recommendation_without_risk() {
        let input = FarmInput {
            irrigation_type: IrrigationType::Flood,
            ..optimal_input()
        };

        let advisory = Advisory::derive(&input, &default_rules());

        assert_eq!(
            advisory.recommendations,
            vec!["Consider upgrading to drip irrigation for 30% better water efficiency"]
        );
        assert!(advisory.risk_factors.is_empty());
    }

    #[test]
    fn rainfed_irrigation_does_not_trigger_flood_rule() {
        let input = FarmInput {
            irrigation_type: IrrigationType::Rainfed,
            ..optimal_input()
        };

        assert_eq!(FloodIrrigationRule.evaluate(&input), None);
    }

    #[test]
    fn low_rainfall_threshold_is_strict() {
        let at_threshold = FarmInput {
            annual_rainfall_inches: dec!(25),
            ..optimal_input()
        };
        let below = FarmInput {
            annual_rainfall_inches: dec!(24.9),
            ..optimal_input()
        };

        assert_eq!(LowRainfallRule.evaluate(&at_threshold), None);
        assert!(LowRainfallRule.evaluate(&below).is_some());
    }

    #[test]
    fn high_rainfall_threshold_is_strict() {
        let at_threshold = FarmInput {
            annual_rainfall_inches: dec!(60),
            ..optimal_input()
        };
        let above = FarmInput {
            annual_rainfall_inches: dec!(60.1),
            ..optimal_input()
        };

        assert_eq!(ExcessRainfallRule.evaluate(&at_threshold), None);
        assert!(ExcessRainfallRule.evaluate(&above).is_some());
    }

    #[test]
    fn mixed_fertilizer_does_not_trigger_npk_advice() {
        let input = FarmInput {
            fertilizer_usage: FertilizerUsage::Mixed,
            ..optimal_input()
        };

        assert_eq!(NoFertilizerRule.evaluate(&input), None);
    }

    #[test]
    fn rules_append_in_rule_order() {
        let input = FarmInput {
            soil_type: SoilType::Sandy,
            irrigation_type: IrrigationType::Flood,
            fertilizer_usage: FertilizerUsage::None,
            annual_rainfall_inches: dec!(65),
            ..optimal_input()
        };

        let advisory = Advisory::derive(&input, &default_rules());

        assert_eq!(
            advisory.recommendations,
            vec![
                "Consider upgrading to drip irrigation for 30% better water efficiency",
                "Add organic matter to improve soil water retention",
                "Apply balanced NPK fertilizer to improve yield",
                "Ensure proper drainage systems are in place",
            ]
        );
        assert_eq!(
            advisory.risk_factors,
            vec![
                "Sandy soil may require more frequent irrigation",
                "Lack of fertilization may significantly reduce yield",
                "Excess rainfall may cause waterlogging issues",
            ]
        );
    }

    #[test]
    fn risk_only_output_still_gets_fallback() {
        struct RiskOnly;

        impl AdvisoryRule for RiskOnly {
            fn id(&self) -> &'static str {
                "risk_only"
            }

            fn evaluate(
                &self,
                _input: &FarmInput,
            ) -> Option<Advice> {
                Some(Advice {
                    recommendation: None,
                    risk_factor: Some("risk"),
                })
            }
        }

        let rules: Vec<Box<dyn AdvisoryRule>> = vec![Box::new(RiskOnly)];
        let advisory = Advisory::derive(&optimal_input(), &rules);

        assert_eq!(advisory.recommendations.len(), 2);
        assert_eq!(advisory.risk_factors, vec!["risk"]);
    }

    #[test]
    fn default_rule_ids_are_unique() {
        let rules = default_rules();
        let mut ids: Vec<_> = rules.iter().map(|rule| rule.id()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), rules.len());
    }
}
