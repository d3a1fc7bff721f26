//! Business rule validation at the ledger boundary.
//!
//! Inputs are rejected, never coerced: a failed validation leaves the ledger
//! exactly as it was.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{InvalidExpenseInput, LedgerError};
use super::types::Traveler;

/// Largest accepted expense amount, in any currency.
///
/// Together with the rate bounds of
/// [`ExchangeRateTable`](crate::currency::ExchangeRateTable) this keeps every
/// converted amount and report total far inside `Decimal`'s range.
pub const MAX_EXPENSE_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Validates trip name and date range.
///
/// # Errors
///
/// Returns `EmptyTripName` or `InvalidDateRange`.
pub fn validate_trip(name: &str, start: NaiveDate, end: NaiveDate) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::EmptyTripName);
    }
    if end < start {
        return Err(LedgerError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Validates a new traveler name against the existing set.
///
/// Names compare case-sensitively after trimming, matching how payers are
/// resolved.
///
/// # Errors
///
/// Returns `EmptyTravelerName` or `DuplicateTraveler`.
pub fn validate_traveler_name(name: &str, existing: &[Traveler]) -> Result<(), LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyTravelerName);
    }
    if existing.iter().any(|t| t.name == name) {
        return Err(LedgerError::DuplicateTraveler(name.to_string()));
    }
    Ok(())
}

/// Validates expense fields and resolves the payer.
///
/// # Errors
///
/// Returns the first `InvalidExpenseInput` found, checked in the order
/// amount, description, category, payer.
pub fn validate_expense(
    description: &str,
    amount: Decimal,
    category: &str,
    paid_by: &str,
    travelers: &[Traveler],
) -> Result<(), InvalidExpenseInput> {
    if amount <= Decimal::ZERO {
        return Err(InvalidExpenseInput::NonPositiveAmount(amount));
    }
    if amount > MAX_EXPENSE_AMOUNT {
        return Err(InvalidExpenseInput::AmountTooLarge(amount));
    }
    if description.trim().is_empty() {
        return Err(InvalidExpenseInput::EmptyDescription);
    }
    if category.trim().is_empty() {
        return Err(InvalidExpenseInput::EmptyCategory);
    }
    let payer = paid_by.trim();
    if !travelers.iter().any(|t| t.name == payer) {
        return Err(InvalidExpenseInput::UnknownPayer(payer.to_string()));
    }
    Ok(())
}
