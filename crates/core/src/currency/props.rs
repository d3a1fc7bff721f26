//! Property-based tests for currency conversion.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tripsplit_shared::types::CurrencyCode;

use super::conversion::CurrencyConverter;
use super::error::CurrencyError;
use super::rates::ExchangeRateTable;

const CODES: [&str; 5] = ["USD", "EUR", "JPY", "GBP", "THB"];

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate a USD-based snapshot covering every code in `CODES`.
fn rate_table() -> impl Strategy<Value = ExchangeRateTable> {
    prop::collection::vec(positive_rate(), CODES.len() - 1).prop_map(|values| {
        let rates = CODES[1..]
            .iter()
            .zip(values)
            .map(|(code, rate)| (CurrencyCode::new(code), rate))
            .collect::<BTreeMap<_, _>>();
        ExchangeRateTable::new(CurrencyCode::new("USD"), rates).unwrap()
    })
}

fn code() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(CODES.to_vec()).prop_map(CurrencyCode::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting into the same currency returns the amount unchanged.
    #[test]
    fn prop_conversion_identity(
        x in amount(),
        c in code(),
        rates in rate_table(),
    ) {
        prop_assert_eq!(CurrencyConverter::convert(x, &c, &c, &rates), Ok(x));
    }

    /// Converting there and back again lands within a tiny tolerance of the input.
    #[test]
    fn prop_conversion_round_trip(
        x in amount(),
        a in code(),
        b in code(),
        rates in rate_table(),
    ) {
        let there = CurrencyConverter::convert(x, &a, &b, &rates).unwrap();
        let back = CurrencyConverter::convert(there, &b, &a, &rates).unwrap();
        let tolerance = Decimal::new(1, 6);
        prop_assert!((back - x).abs() <= tolerance, "{} -> {} -> {}", x, there, back);
    }

    /// Any pair with a side missing from the snapshot is unavailable, for every amount.
    #[test]
    fn prop_missing_rate_is_unavailable(
        x in amount(),
        present in code(),
        rates in rate_table(),
        missing_first in any::<bool>(),
    ) {
        let missing = CurrencyCode::new("XXX");
        let (from, to) = if missing_first {
            (missing.clone(), present)
        } else {
            (present, missing.clone())
        };

        let result = CurrencyConverter::convert(x, &from, &to, &rates);
        prop_assert_eq!(
            result,
            Err(CurrencyError::RateUnavailable { from: from.clone(), to: to.clone() })
        );
        prop_assert!(CurrencyConverter::rate(&from, &to, &rates).is_err());
    }

    /// Conversion of a non-negative amount never goes negative.
    #[test]
    fn prop_conversion_non_negative(
        x in amount(),
        a in code(),
        b in code(),
        rates in rate_table(),
    ) {
        let result = CurrencyConverter::convert(x, &a, &b, &rates).unwrap();
        prop_assert!(result >= Decimal::ZERO);
    }

    /// Fallback conversion only marks the result approximate when a rate is missing.
    #[test]
    fn prop_fallback_only_when_missing(
        x in amount(),
        a in code(),
        b in code(),
        rates in rate_table(),
    ) {
        let converted = CurrencyConverter::convert_or_fallback(x, &a, &b, &rates);
        prop_assert!(!converted.is_approximate());
    }
}
