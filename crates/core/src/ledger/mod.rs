//! Trip expense ledger.
//!
//! This module implements the source of truth the report engines read:
//! - Trip, traveler and expense records
//! - Input validation at the ledger boundary
//! - The append-only traveler set and add/delete expense operations
//! - An activity log of every mutation

pub mod activity;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use activity::{ActivityAction, ActivityEntry, ActivityLog, TripActivitySummary};
pub use error::{InvalidExpenseInput, LedgerError};
pub use service::ExpenseLedger;
pub use types::{
    Category, CreateExpenseInput, CreateTravelerInput, CreateTripInput, Expense, Traveler, Trip,
    UpdateTripInput,
};
