//! Exchange rate snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::CurrencyCode;

use super::error::CurrencyError;

/// Smallest accepted rate against the base.
pub const MIN_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Largest accepted rate against the base.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Read-only snapshot of exchange rates relative to a single base currency.
///
/// `rates[code]` is how many units of `code` one unit of `base` buys. The base
/// itself is always present with rate 1. Every stored rate lies within
/// [`MIN_RATE`]..=[`MAX_RATE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRateTable")]
pub struct ExchangeRateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Wire shape of a snapshot, validated into [`ExchangeRateTable`].
#[derive(Deserialize)]
struct RawRateTable {
    base: CurrencyCode,
    #[serde(default)]
    rates: BTreeMap<CurrencyCode, Decimal>,
    #[serde(default)]
    fetched_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawRateTable> for ExchangeRateTable {
    type Error = CurrencyError;

    fn try_from(raw: RawRateTable) -> Result<Self, Self::Error> {
        let mut table = Self::new(raw.base, raw.rates)?;
        table.fetched_at = raw.fetched_at;
        Ok(table)
    }
}

impl ExchangeRateTable {
    /// Creates a snapshot, inserting the base currency at rate 1 if missing.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::InvalidRate` if any rate is outside
    /// `MIN_RATE..=MAX_RATE`.
    pub fn new(
        base: CurrencyCode,
        rates: BTreeMap<CurrencyCode, Decimal>,
    ) -> Result<Self, CurrencyError> {
        if let Some((currency, rate)) = rates
            .iter()
            .find(|(_, rate)| !(MIN_RATE..=MAX_RATE).contains(*rate))
        {
            return Err(CurrencyError::InvalidRate {
                currency: currency.clone(),
                rate: *rate,
            });
        }

        let mut rates = rates;
        rates.entry(base.clone()).or_insert(Decimal::ONE);

        Ok(Self {
            base,
            rates,
            fetched_at: None,
        })
    }

    /// An empty snapshot: every conversion except identity is unavailable.
    #[must_use]
    pub fn empty(base: CurrencyCode) -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(base.clone(), Decimal::ONE);
        Self {
            base,
            rates,
            fetched_at: None,
        }
    }

    /// Stamps the snapshot with the time it was fetched.
    #[must_use]
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }

    /// The base currency all rates are expressed against.
    #[must_use]
    pub const fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Rate of `code` relative to the base, if present.
    #[must_use]
    pub fn get(&self, code: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Returns true if the snapshot has a rate for `code`.
    #[must_use]
    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    /// Number of currencies in the snapshot, base included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the snapshot holds no rates. Tables built by this
    /// module always carry their base currency.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// When the snapshot was fetched, if known.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Returns true if the snapshot should be refreshed.
    ///
    /// Snapshots without a fetch time are always stale.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.fetched_at
            .is_none_or(|fetched_at| now - fetched_at > max_age)
    }
}
