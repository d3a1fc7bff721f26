//! Rounding at the presentation boundary.
//!
//! Uses banker's rounding (round half to even) like every other rounding in
//! the workspace. Nothing inside the engines calls this; only renderers do.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use tripsplit_shared::config::SettlementConfig;

/// Decimal places used when presenting amounts and percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPolicy {
    /// Decimal places for money amounts.
    pub amount_decimals: u32,
    /// Decimal places for percentages.
    pub percentage_decimals: u32,
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self {
            amount_decimals: 2,
            percentage_decimals: 1,
        }
    }
}

impl From<&SettlementConfig> for DisplayPolicy {
    fn from(config: &SettlementConfig) -> Self {
        Self {
            amount_decimals: config.amount_decimals,
            percentage_decimals: config.percentage_decimals,
        }
    }
}

impl DisplayPolicy {
    /// Rounds a money amount for display.
    #[must_use]
    pub fn amount(&self, value: Decimal) -> Decimal {
        round(value, self.amount_decimals)
    }

    /// Rounds a percentage for display.
    #[must_use]
    pub fn percentage(&self, value: Decimal) -> Decimal {
        round(value, self.percentage_decimals)
    }
}

/// Round a decimal value using Banker's Rounding.
#[must_use]
pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bankers_rounding_midpoint_to_even() {
        assert_eq!(round(dec!(2.5), 0), dec!(2));
        assert_eq!(round(dec!(3.5), 0), dec!(4));
        assert_eq!(round(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round(dec!(2.35), 1), dec!(2.4));
    }

    #[test]
    fn test_default_policy() {
        let policy = DisplayPolicy::default();
        assert_eq!(policy.amount(dec!(33.333333)), dec!(33.33));
        assert_eq!(policy.amount(dec!(10.005)), dec!(10.00));
        assert_eq!(policy.percentage(dec!(66.6666)), dec!(66.7));
    }

    #[test]
    fn test_policy_from_config() {
        let config = SettlementConfig {
            epsilon: dec!(0.01),
            amount_decimals: 0,
            percentage_decimals: 2,
        };
        let policy = DisplayPolicy::from(&config);
        assert_eq!(policy.amount(dec!(1234.56)), dec!(1235));
        assert_eq!(policy.percentage(dec!(12.345)), dec!(12.34));
    }
}
