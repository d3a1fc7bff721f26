//! Settlement error types.

use thiserror::Error;
use tripsplit_shared::AppError;

/// Errors that can occur while computing a split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// The trip has nobody to split between.
    #[error("Trip has no travelers to split expenses between")]
    NoTravelers,
}

impl SettlementError {
    /// Returns true if the caller can show an informational result instead.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::NoTravelers => true,
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::NoTravelers => Self::BusinessRule(err.to_string()),
        }
    }
}
