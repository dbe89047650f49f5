//! Common utility functions for tax calculations.
//!
//! Slab arithmetic stays unrounded; only the cess and display steps round.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Largest amount, in rupees, the engine works with (10^20).
///
/// Input amounts are clamped to this ceiling so that sums and percentage
/// products stay well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(100000000000000000000);

/// Rounds to the nearest whole rupee, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::calculations::common::round_to_rupee;
///
/// assert_eq!(round_to_rupee(dec!(650.4)), dec!(650));
/// assert_eq!(round_to_rupee(dec!(650.5)), dec!(651));
/// assert_eq!(round_to_rupee(dec!(-650.5)), dec!(-651));
/// ```
pub fn round_to_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two decimal places, halves away from zero. Used for percentages.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(9.994)), dec!(9.99));
/// assert_eq!(round_half_up(dec!(9.995)), dec!(10.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-1)), dec!(0));
/// assert_eq!(non_negative(dec!(42)), dec!(42));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamps a value into `0..=MAX_AMOUNT`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use finzo_core::calculations::common::{MAX_AMOUNT, clamp_amount};
///
/// assert_eq!(clamp_amount(dec!(-1)), dec!(0));
/// assert_eq!(clamp_amount(dec!(800000)), dec!(800000));
/// assert_eq!(clamp_amount(Decimal::MAX), MAX_AMOUNT);
/// ```
pub fn clamp_amount(value: Decimal) -> Decimal {
    non_negative(value).min(MAX_AMOUNT)
}

/// Applies a percentage: `value × percent / 100`.
pub fn percent_of(
    value: Decimal,
    percent: Decimal,
) -> Decimal {
    value * percent / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_rupee tests
    // =========================================================================

    #[test]
    fn round_to_rupee_rounds_down_below_midpoint() {
        assert_eq!(round_to_rupee(dec!(7399.49)), dec!(7399));
    }

    #[test]
    fn round_to_rupee_rounds_up_at_midpoint() {
        assert_eq!(round_to_rupee(dec!(7399.5)), dec!(7400));
    }

    #[test]
    fn round_to_rupee_preserves_whole_values() {
        assert_eq!(round_to_rupee(dec!(7400)), dec!(7400));
    }

    #[test]
    fn round_to_rupee_handles_zero() {
        assert_eq!(round_to_rupee(dec!(0.00)), dec!(0));
    }

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_at_midpoint() {
        assert_eq!(round_half_up(dec!(12.345)), dec!(12.35));
    }

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(12.344)), dec!(12.34));
    }

    // =========================================================================
    // non_negative / clamp_amount / percent_of tests
    // =========================================================================

    #[test]
    fn non_negative_keeps_zero() {
        assert_eq!(non_negative(dec!(0)), dec!(0));
    }

    #[test]
    fn clamp_amount_caps_at_ceiling() {
        assert_eq!(clamp_amount(MAX_AMOUNT + dec!(1)), MAX_AMOUNT);
        assert_eq!(clamp_amount(Decimal::MIN), dec!(0));
    }

    #[test]
    fn percent_of_is_exact() {
        assert_eq!(percent_of(dec!(325000), dec!(5)), dec!(16250));
        assert_eq!(percent_of(dec!(333333), dec!(10)), dec!(33333.3));
    }
}
