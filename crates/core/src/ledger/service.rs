//! The expense ledger: trip metadata, travelers and expenses.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::{CurrencyCode, ExpenseId, TravelerId, TripId};

use super::activity::{ActivityAction, ActivityLog};
use super::error::LedgerError;
use super::types::{
    Category, CreateExpenseInput, CreateTravelerInput, CreateTripInput, Expense, Traveler, Trip,
    UpdateTripInput,
};
use super::validation::{validate_expense, validate_traveler_name, validate_trip};
use crate::currency::CurrencyConverter;

/// Source of truth for one trip.
///
/// Travelers are append-only and expenses are only ever added or deleted, so
/// every expense's payer names a traveler for the ledger's whole lifetime.
/// The engines read a ledger by shared reference; mutation goes through the
/// methods below, each of which validates before touching any state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseLedger {
    trip: Trip,
    travelers: Vec<Traveler>,
    expenses: Vec<Expense>,
    activity: ActivityLog,
}

/// Wire shape of a ledger snapshot, validated into [`ExpenseLedger`].
#[derive(Deserialize)]
struct LedgerSnapshot {
    trip: Trip,
    #[serde(default)]
    travelers: Vec<Traveler>,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default)]
    activity: ActivityLog,
}

impl<'de> Deserialize<'de> for ExpenseLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let snapshot = LedgerSnapshot::deserialize(deserializer)?;
        Self::from_parts(
            snapshot.trip,
            snapshot.travelers,
            snapshot.expenses,
            snapshot.activity,
        )
        .map_err(serde::de::Error::custom)
    }
}

impl ExpenseLedger {
    /// Creates a ledger for a new trip.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTripName` or `InvalidDateRange`.
    pub fn create(input: CreateTripInput) -> Result<Self, LedgerError> {
        validate_trip(&input.name, input.start_date, input.end_date)?;
        Self::warn_if_unsupported(&input.currency);

        let trip = Trip {
            id: TripId::new(),
            name: input.name.trim().to_string(),
            destination: input.destination.trim().to_string(),
            start_date: input.start_date,
            end_date: input.end_date,
            currency: input.currency,
            created_at: Utc::now(),
        };

        let mut activity = ActivityLog::new();
        activity.trip_created(&trip);
        tracing::info!(trip_id = %trip.id, name = %trip.name, currency = %trip.currency, "trip created");

        Ok(Self {
            trip,
            travelers: Vec::new(),
            expenses: Vec::new(),
            activity,
        })
    }

    /// Rebuilds a ledger from persisted parts, re-checking its invariants.
    ///
    /// Traveler names and payers are trimmed the same way `add_traveler` and
    /// `add_expense` trim them, so names differing only in whitespace collide.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: trip validity, traveler names,
    /// then each expense.
    pub fn from_parts(
        trip: Trip,
        travelers: Vec<Traveler>,
        expenses: Vec<Expense>,
        activity: ActivityLog,
    ) -> Result<Self, LedgerError> {
        validate_trip(&trip.name, trip.start_date, trip.end_date)?;

        let travelers: Vec<Traveler> = travelers
            .into_iter()
            .map(|mut traveler| {
                traveler.name = traveler.name.trim().to_string();
                traveler
            })
            .collect();
        let expenses: Vec<Expense> = expenses
            .into_iter()
            .map(|mut expense| {
                expense.paid_by = expense.paid_by.trim().to_string();
                expense
            })
            .collect();

        for (index, traveler) in travelers.iter().enumerate() {
            validate_traveler_name(&traveler.name, &travelers[..index])?;
        }

        for expense in &expenses {
            validate_expense(
                &expense.description,
                expense.amount,
                expense.category.key(),
                &expense.paid_by,
                &travelers,
            )?;
        }

        Ok(Self {
            trip,
            travelers,
            expenses,
            activity,
        })
    }

    /// Trip metadata.
    #[must_use]
    pub const fn trip(&self) -> &Trip {
        &self.trip
    }

    /// The trip's default currency.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.trip.currency
    }

    /// Travelers in the order they joined.
    #[must_use]
    pub fn travelers(&self) -> &[Traveler] {
        &self.travelers
    }

    /// Expenses in the order they were added.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// The mutation log.
    #[must_use]
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Updates trip metadata.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTripName` or `InvalidDateRange` for the merged result;
    /// the trip is unchanged on error.
    pub fn update_trip(&mut self, input: UpdateTripInput) -> Result<&Trip, LedgerError> {
        let name = input.name.unwrap_or_else(|| self.trip.name.clone());
        let start_date = input.start_date.unwrap_or(self.trip.start_date);
        let end_date = input.end_date.unwrap_or(self.trip.end_date);
        validate_trip(&name, start_date, end_date)?;

        if let Some(currency) = input.currency {
            Self::warn_if_unsupported(&currency);
            self.trip.currency = currency;
        }
        if let Some(destination) = input.destination {
            self.trip.destination = destination.trim().to_string();
        }
        self.trip.name = name.trim().to_string();
        self.trip.start_date = start_date;
        self.trip.end_date = end_date;

        self.activity.record(
            self.trip.id,
            ActivityAction::TripUpdated {
                trip_name: self.trip.name.clone(),
            },
            Utc::now(),
        );
        tracing::info!(trip_id = %self.trip.id, "trip updated");

        Ok(&self.trip)
    }

    /// Adds a traveler.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTravelerName` or `DuplicateTraveler`.
    pub fn add_traveler(&mut self, input: CreateTravelerInput) -> Result<&Traveler, LedgerError> {
        validate_traveler_name(&input.name, &self.travelers)?;

        let traveler = Traveler {
            id: TravelerId::new(),
            name: input.name.trim().to_string(),
            email: input
                .email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        };

        self.activity.traveler_added(self.trip.id, &traveler);
        tracing::info!(trip_id = %self.trip.id, traveler = %traveler.name, "traveler added");

        self.travelers.push(traveler);
        Ok(&self.travelers[self.travelers.len() - 1])
    }

    /// Adds an expense.
    ///
    /// Currency defaults to the trip currency. Unsupported currency codes are
    /// accepted and pass through the reports unconverted.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidExpense` for a non-positive amount, blank
    /// description or category, or a payer who is not a traveler.
    pub fn add_expense(&mut self, input: CreateExpenseInput) -> Result<&Expense, LedgerError> {
        validate_expense(
            &input.description,
            input.amount,
            &input.category,
            &input.paid_by,
            &self.travelers,
        )?;

        let currency = input.currency.unwrap_or_else(|| self.trip.currency.clone());
        Self::warn_if_unsupported(&currency);

        let expense = Expense {
            id: ExpenseId::new(),
            description: input.description.trim().to_string(),
            amount: input.amount,
            currency,
            category: Category::parse(&input.category),
            paid_by: input.paid_by.trim().to_string(),
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
        };

        self.activity.expense_added(self.trip.id, &expense);
        tracing::info!(
            trip_id = %self.trip.id,
            expense_id = %expense.id,
            amount = %expense.money(),
            paid_by = %expense.paid_by,
            "expense added"
        );

        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Deletes an expense by ID and returns it.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound` if no expense has this ID.
    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<Expense, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::ExpenseNotFound(id))?;
        let removed = self.expenses.remove(index);

        self.activity.record(
            self.trip.id,
            ActivityAction::ExpenseDeleted { expense_id: id },
            Utc::now(),
        );
        tracing::info!(trip_id = %self.trip.id, expense_id = %id, amount = %removed.money(), "expense deleted");

        Ok(removed)
    }

    /// Looks up a traveler by name.
    #[must_use]
    pub fn traveler(&self, name: &str) -> Option<&Traveler> {
        self.travelers.iter().find(|t| t.name == name)
    }

    /// Expenses in one category.
    pub fn expenses_by_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = &'a Expense> {
        self.expenses.iter().filter(move |e| &e.category == category)
    }

    /// Expenses paid by one traveler.
    pub fn expenses_by_payer<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Expense> {
        self.expenses.iter().filter(move |e| e.paid_by == name)
    }

    fn warn_if_unsupported(currency: &CurrencyCode) {
        if let Err(err) = CurrencyConverter::ensure_supported(currency) {
            tracing::warn!(%currency, error = %err, "currency outside the supported set; amounts pass through unconverted");
        }
    }
}
