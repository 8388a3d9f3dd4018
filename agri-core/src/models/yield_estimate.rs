use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four factors applied to the base yield, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldMultipliers {
    pub soil: Decimal,
    pub irrigation: Decimal,
    pub fertilizer: Decimal,
    pub rainfall: Decimal,
}

impl YieldMultipliers {
    /// Product of all four factors.
    pub fn combined(&self) -> Decimal {
        self.soil * self.irrigation * self.fertilizer * self.rainfall
    }
}

/// Result of a yield estimate. Recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    /// Land size times the per-acre base rate, before any multiplier.
    pub base_yield_kg: Decimal,

    pub multipliers: YieldMultipliers,

    /// Predicted harvest in whole kilograms.
    pub predicted_yield_kg: Decimal,

    /// Display-only confidence figure in [70, 95).
    /// Sampled per call, unrelated to estimator accuracy.
    pub confidence_percent: f64,

    /// Advisory text, in rule order. Never empty.
    pub recommendations: Vec<String>,

    /// Risk notes, in rule order. May be empty.
    pub risk_factors: Vec<String>,
}
