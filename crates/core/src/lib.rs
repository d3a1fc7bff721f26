//! Core trip expense logic for Tripsplit.
//!
//! This crate contains pure business logic with ZERO file, network or runtime
//! dependencies. Every engine call receives the ledger and rate snapshots it
//! works on; nothing is cached between calls.
//!
//! # Modules
//!
//! - `currency` - Exchange rate snapshots, conversion and display rounding
//! - `ledger` - Trips, travelers, expenses and the activity log
//! - `reports` - Summary, category, per-payer and daily aggregation
//! - `settlement` - Fair-share balances and settlement transfers

pub mod currency;
pub mod ledger;
pub mod reports;
pub mod settlement;

#[cfg(test)]
mod testing;

use rust_decimal::Decimal;
use tripsplit_shared::types::CurrencyCode;

use currency::{CurrencyConverter, CurrencyError, ExchangeRateTable};
use ledger::ExpenseLedger;
use reports::{AggregationEngine, CategoryLine, PersonLine, TripSummary};
use settlement::{SettlementEngine, SettlementError, SplitReport};

/// Trip-wide totals in the trip currency.
#[must_use]
pub fn compute_summary(ledger: &ExpenseLedger, rates: &ExchangeRateTable) -> TripSummary {
    AggregationEngine::compute_summary(ledger, rates)
}

/// Per-category totals, largest first.
#[must_use]
pub fn compute_category_report(
    ledger: &ExpenseLedger,
    rates: &ExchangeRateTable,
) -> Vec<CategoryLine> {
    AggregationEngine::compute_category_report(ledger, rates)
}

/// Per-payer totals, largest first.
#[must_use]
pub fn compute_people_report(ledger: &ExpenseLedger, rates: &ExchangeRateTable) -> Vec<PersonLine> {
    AggregationEngine::compute_people_report(ledger, rates)
}

/// Equal-split settlement with the default epsilon.
///
/// # Errors
///
/// Returns `SettlementError::NoTravelers` for a trip without travelers.
pub fn compute_split_report(
    ledger: &ExpenseLedger,
    rates: &ExchangeRateTable,
) -> Result<SplitReport, SettlementError> {
    SettlementEngine::default().compute_split_report(ledger, rates)
}

/// Converts `amount` between two currencies of the snapshot.
///
/// # Errors
///
/// Returns `CurrencyError::RateUnavailable` if either code is missing.
pub fn convert(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    rates: &ExchangeRateTable,
) -> Result<Decimal, CurrencyError> {
    CurrencyConverter::convert(amount, from, to, rates)
}
