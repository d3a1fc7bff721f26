//! Fair-share settlement.
//!
//! Splits the trip's converted grand total equally between travelers,
//! classifies each traveler's balance and plans the transfers that settle it.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::SettlementError;
pub use service::SettlementEngine;
pub use types::{BalanceStatus, SplitReport, Transfer, TravelerBalance};
