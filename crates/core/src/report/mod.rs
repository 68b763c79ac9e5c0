//! Plan-vs-actual report math.

use rust_decimal::Decimal;

/// Budget burn rate as a percentage, rounded to one decimal place.
///
/// A zero plan reports 0 rather than dividing.
#[must_use]
pub fn burn_rate(plan: Decimal, actual: Decimal) -> Decimal {
    if plan <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (actual / plan * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Remaining budget: plan minus actual spend.
#[must_use]
pub fn remaining(plan: Decimal, actual: Decimal) -> Decimal {
    plan - actual
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_burn_rate() {
        assert_eq!(burn_rate(dec!(1000), dec!(250)), dec!(25.0));
        assert_eq!(burn_rate(dec!(300), dec!(100)), dec!(33.3));
        assert_eq!(burn_rate(dec!(1000), dec!(1200)), dec!(120.0));
    }

    #[test]
    fn test_zero_plan_burn_rate() {
        assert_eq!(burn_rate(dec!(0), dec!(500)), dec!(0));
    }

    #[test]
    fn test_remaining() {
        assert_eq!(remaining(dec!(1000), dec!(250)), dec!(750));
        assert_eq!(remaining(dec!(100), dec!(150)), dec!(-50));
    }
}
