//! Currency conversion through a snapshot's base currency.
//!
//! `amount_in_base = amount / rates[from]`, `result = amount_in_base * rates[to]`.
//! Results keep full `Decimal` precision so repeated conversions do not
//! accumulate rounding error; round with [`super::DisplayPolicy`] when presenting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::CurrencyCode;

use super::error::CurrencyError;
use super::rates::ExchangeRateTable;

/// How an amount reached the target currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// Source and target are the same currency; no rate involved.
    Identity,
    /// Converted with rates from the snapshot.
    Converted,
    /// No rate was available; the amount was carried over 1:1.
    Fallback,
}

/// An amount expressed in a target currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Converted {
    /// Amount in the target currency, unrounded.
    pub amount: Decimal,
    /// How the amount was obtained.
    pub kind: ConversionKind,
}

impl Converted {
    /// Returns true if the amount came from a 1:1 fallback.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        matches!(self.kind, ConversionKind::Fallback)
    }
}

/// A "quick convert" annotation for a persisted currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickConversion {
    /// Source amount.
    pub amount: Decimal,
    /// Source currency.
    pub from_currency: CurrencyCode,
    /// Target currency.
    pub to_currency: CurrencyCode,
    /// Amount in the target currency.
    pub converted_amount: Decimal,
    /// Units of `to_currency` per unit of `from_currency`.
    pub rate: Decimal,
}

/// Pure conversion functions over an [`ExchangeRateTable`].
pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Converts `amount` from one currency to another.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::RateUnavailable` if either code is missing from
    /// the snapshot, or `Overflow` if the result does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use rust_decimal_macros::dec;
    /// use tripsplit_core::currency::{CurrencyConverter, ExchangeRateTable};
    /// use tripsplit_shared::types::CurrencyCode;
    ///
    /// let rates = ExchangeRateTable::new(
    ///     CurrencyCode::new("USD"),
    ///     BTreeMap::from([(CurrencyCode::new("EUR"), dec!(0.5))]),
    /// )
    /// .unwrap();
    /// let eur = CurrencyConverter::convert(
    ///     dec!(10),
    ///     &CurrencyCode::new("USD"),
    ///     &CurrencyCode::new("EUR"),
    ///     &rates,
    /// );
    /// assert_eq!(eur, Ok(dec!(5)));
    /// ```
    pub fn convert(
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &ExchangeRateTable,
    ) -> Result<Decimal, CurrencyError> {
        let (rate_from, rate_to) = Self::pair(from, to, rates)?;
        if from == to {
            return Ok(amount);
        }
        amount
            .checked_div(rate_from)
            .and_then(|in_base| in_base.checked_mul(rate_to))
            .ok_or_else(|| CurrencyError::Overflow {
                amount,
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Units of `to` per unit of `from`.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::RateUnavailable` if either code is missing from
    /// the snapshot.
    pub fn rate(
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &ExchangeRateTable,
    ) -> Result<Decimal, CurrencyError> {
        let (rate_from, rate_to) = Self::pair(from, to, rates)?;
        if from == to {
            return Ok(Decimal::ONE);
        }
        Ok(rate_to / rate_from)
    }

    /// Converts for aggregation, never failing.
    ///
    /// Same-currency amounts are returned as `Identity` even when the code is
    /// absent from the snapshot. Missing rates fall back to 1:1 and are marked
    /// `Fallback` so reports can flag the total as approximate.
    #[must_use]
    pub fn convert_or_fallback(
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &ExchangeRateTable,
    ) -> Converted {
        if from == to {
            return Converted {
                amount,
                kind: ConversionKind::Identity,
            };
        }

        match Self::convert(amount, from, to, rates) {
            Ok(amount) => Converted {
                amount,
                kind: ConversionKind::Converted,
            },
            Err(err) => {
                tracing::warn!(%from, %to, %amount, error = %err, "using 1:1 fallback conversion");
                Converted {
                    amount,
                    kind: ConversionKind::Fallback,
                }
            }
        }
    }

    /// Builds the quick-convert annotation for a persisted preference pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::UnknownCurrencyCode` if either side is outside
    /// the supported set, or `RateUnavailable` if the snapshot lacks a rate.
    pub fn quick_convert(
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &ExchangeRateTable,
    ) -> Result<QuickConversion, CurrencyError> {
        Self::ensure_supported(from)?;
        Self::ensure_supported(to)?;

        let rate = Self::rate(from, to, rates)?;
        let converted_amount = Self::convert(amount, from, to, rates)?;

        Ok(QuickConversion {
            amount,
            from_currency: from.clone(),
            to_currency: to.clone(),
            converted_amount,
            rate,
        })
    }

    /// Checks that `code` belongs to the supported currency set.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::UnknownCurrencyCode` otherwise.
    pub fn ensure_supported(code: &CurrencyCode) -> Result<(), CurrencyError> {
        if code.is_supported() {
            Ok(())
        } else {
            Err(CurrencyError::UnknownCurrencyCode(code.clone()))
        }
    }

    fn pair(
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &ExchangeRateTable,
    ) -> Result<(Decimal, Decimal), CurrencyError> {
        match (rates.get(from), rates.get(to)) {
            (Some(rate_from), Some(rate_to)) => Ok((rate_from, rate_to)),
            _ => Err(CurrencyError::RateUnavailable {
                from: from.clone(),
                to: to.clone(),
            }),
        }
    }
}
