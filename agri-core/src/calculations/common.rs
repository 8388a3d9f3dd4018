//! Common utility functions for yield calculations.
//!
//! This module provides shared numeric helpers used across the estimator,
//! the multiplier table, and the advisory rules.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// Values exactly at the midpoint are rounded away from zero, so `0.5` kg
/// becomes `1` kg.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use agri_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(58499.5), 0), dec!(58500));
/// assert_eq!(round_half_up(dec!(58499.49), 0), dec!(58499));
/// assert_eq!(round_half_up(dec!(12.345), 2), dec!(12.35));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `true` when `value` lies in the closed range `[low, high]`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use agri_core::calculations::common::within_inclusive;
///
/// assert!(within_inclusive(dec!(30), dec!(30), dec!(50)));
/// assert!(within_inclusive(dec!(50), dec!(30), dec!(50)));
/// assert!(!within_inclusive(dec!(50.001), dec!(30), dec!(50)));
/// ```
pub fn within_inclusive(
    value: Decimal,
    low: Decimal,
    high: Decimal,
) -> bool {
    value >= low && value <= high
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(58499.49), 0);

        assert_eq!(result, dec!(58499));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(58499.5), 0);

        assert_eq!(result, dec!(58500));
    }

    #[test]
    fn round_half_up_preserves_whole_values() {
        let result = round_half_up(dec!(58500.000000), 0);

        assert_eq!(result, dec!(58500));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0.0), 0);

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn round_half_up_respects_decimal_places() {
        let result = round_half_up(dec!(91.25), 1);

        assert_eq!(result, dec!(91.3));
    }

    // =========================================================================
    // within_inclusive tests
    // =========================================================================

    #[test]
    fn within_inclusive_includes_both_bounds() {
        assert!(within_inclusive(dec!(30), dec!(30), dec!(50)));
        assert!(within_inclusive(dec!(50), dec!(30), dec!(50)));
    }

    #[test]
    fn within_inclusive_excludes_values_just_outside() {
        assert!(!within_inclusive(dec!(29.999), dec!(30), dec!(50)));
        assert!(!within_inclusive(dec!(50.001), dec!(30), dec!(50)));
    }
}
