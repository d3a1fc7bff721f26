//! Trip report aggregation.
//!
//! Pure functions over a ledger and rate snapshot:
//! - Trip summary (totals per currency, grand total, average)
//! - Category breakdown
//! - Per-payer breakdown
//! - Daily totals

pub mod service;
pub mod types;


pub use service::AggregationEngine;
pub use types::*;
