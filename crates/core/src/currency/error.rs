//! Currency error types.

use rust_decimal::Decimal;
use thiserror::Error;
use tripsplit_shared::types::CurrencyCode;
use tripsplit_shared::AppError;

/// Errors that can occur during currency operations.
///
/// `RateUnavailable` and `UnknownCurrencyCode` are recoverable: callers show
/// the unconverted amount. `InvalidRate` means the snapshot itself is corrupt,
/// and `Overflow` means the amount was out of range for the pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The snapshot has no rate for one side of the pair.
    #[error("No exchange rate available for {from} to {to}")]
    RateUnavailable {
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
    },

    /// The code is outside the supported currency set.
    #[error("Unknown currency code: {0}")]
    UnknownCurrencyCode(CurrencyCode),

    /// The snapshot carries a rate outside the accepted range.
    #[error("Invalid exchange rate {rate} for {currency}")]
    InvalidRate {
        /// Currency with the bad rate.
        currency: CurrencyCode,
        /// The offending rate.
        rate: Decimal,
    },

    /// The converted amount does not fit in a `Decimal`.
    #[error("Converting {amount} from {from} to {to} overflows")]
    Overflow {
        /// Amount being converted.
        amount: Decimal,
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
    },
}

impl CurrencyError {
    /// Returns true if the caller should fall back to the unconverted amount.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidRate { .. } | Self::Overflow { .. })
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::InvalidRate { .. } => Self::Snapshot(err.to_string()),
            CurrencyError::Overflow { .. } => Self::Validation(err.to_string()),
            CurrencyError::RateUnavailable { .. } | CurrencyError::UnknownCurrencyCode(_) => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}
