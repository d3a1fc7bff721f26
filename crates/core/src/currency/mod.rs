//! Multi-currency handling over exchange rate snapshots.
//!
//! All conversions triangulate through the snapshot's base currency and keep
//! full precision. Rounding happens only in [`display`].

pub mod conversion;
pub mod display;
pub mod error;
pub mod rates;

#[cfg(test)]
mod props;

pub use conversion::{ConversionKind, Converted, CurrencyConverter, QuickConversion};
pub use display::DisplayPolicy;
pub use error::CurrencyError;
pub use rates::{ExchangeRateTable, MAX_RATE, MIN_RATE};
