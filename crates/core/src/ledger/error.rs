//! Ledger error types.
//!
//! Every variant is recoverable: a rejected input leaves the ledger untouched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tripsplit_shared::types::ExpenseId;
use tripsplit_shared::AppError;

/// Reasons an expense is rejected before it enters the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidExpenseInput {
    /// Amount is zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Amount is above the accepted maximum.
    #[error("Expense amount {0} exceeds the maximum of {max}", max = super::validation::MAX_EXPENSE_AMOUNT)]
    AmountTooLarge(Decimal),

    /// Description is empty or whitespace.
    #[error("Expense description cannot be empty")]
    EmptyDescription,

    /// Category is empty or whitespace.
    #[error("Expense category cannot be empty")]
    EmptyCategory,

    /// Payer does not match any traveler on the trip.
    #[error("Payer '{0}' is not a traveler on this trip")]
    UnknownPayer(String),
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Trip Errors ==========
    /// Trip name is empty.
    #[error("Trip name cannot be empty")]
    EmptyTripName,

    /// Trip ends before it starts.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    // ========== Traveler Errors ==========
    /// Traveler name is empty.
    #[error("Traveler name cannot be empty")]
    EmptyTravelerName,

    /// A traveler with this name is already on the trip.
    #[error("Traveler '{0}' already exists on this trip")]
    DuplicateTraveler(String),

    // ========== Expense Errors ==========
    /// Expense input was rejected.
    #[error("Invalid expense: {0}")]
    InvalidExpense(#[from] InvalidExpenseInput),

    /// No expense with this ID.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ExpenseNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::DuplicateTraveler(_) => Self::Conflict(err.to_string()),
            LedgerError::EmptyTripName
            | LedgerError::InvalidDateRange { .. }
            | LedgerError::EmptyTravelerName
            | LedgerError::InvalidExpense(_) => Self::Validation(err.to_string()),
        }
    }
}

impl From<InvalidExpenseInput> for AppError {
    fn from(err: InvalidExpenseInput) -> Self {
        LedgerError::from(err).into()
    }
}
