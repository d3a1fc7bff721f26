//! Ledger domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::{CurrencyCode, ExpenseId, Money, TravelerId, TripId};

/// A group trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Trip ID.
    pub id: TripId,
    /// Trip name.
    pub name: String,
    /// Destination.
    pub destination: String,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip.
    pub end_date: NaiveDate,
    /// Default currency; every report is expressed in it.
    pub currency: CurrencyCode,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A traveler sharing the trip's costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    /// Traveler ID.
    pub id: TravelerId,
    /// Name, unique within the trip. Expenses reference travelers by name.
    pub name: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Expense category.
///
/// Anything outside the built-in set is kept as lower-cased free text and
/// rendered with the generic label and icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Restaurants and meals.
    Food,
    /// Supermarket shopping.
    Groceries,
    /// Snacks and drinks.
    Snacks,
    /// Flights, trains, taxis, fuel.
    Transport,
    /// Hotels and rentals.
    Accommodation,
    /// Tours, tickets, entertainment.
    Activities,
    /// Souvenirs and other purchases.
    Shopping,
    /// Uncategorized.
    Other,
    /// User supplied category.
    Custom(String),
}

impl Category {
    /// Generic label used for custom categories.
    pub const GENERIC_LABEL: &'static str = "Other";
    /// Generic icon used for custom categories.
    pub const GENERIC_ICON: &'static str = "📦";

    /// Parses a category key, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let key = input.trim().to_lowercase();
        match key.as_str() {
            "food" => Self::Food,
            "groceries" => Self::Groceries,
            "snacks" => Self::Snacks,
            "transport" => Self::Transport,
            "accommodation" => Self::Accommodation,
            "activities" => Self::Activities,
            "shopping" => Self::Shopping,
            "other" => Self::Other,
            _ => Self::Custom(key),
        }
    }

    /// The key stored in snapshots.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Food => "food",
            Self::Groceries => "groceries",
            Self::Snacks => "snacks",
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Activities => "activities",
            Self::Shopping => "shopping",
            Self::Other => "other",
            Self::Custom(key) => key,
        }
    }

    /// Display label; custom categories get the generic one.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Groceries => "Groceries",
            Self::Snacks => "Snacks",
            Self::Transport => "Transport",
            Self::Accommodation => "Accommodation",
            Self::Activities => "Activities",
            Self::Shopping => "Shopping",
            Self::Other | Self::Custom(_) => Self::GENERIC_LABEL,
        }
    }

    /// Display icon; custom categories get the generic one.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍽️",
            Self::Groceries => "🛒",
            Self::Snacks => "🍿",
            Self::Transport => "🚗",
            Self::Accommodation => "🏨",
            Self::Activities => "🎭",
            Self::Shopping => "🛍️",
            Self::Other | Self::Custom(_) => Self::GENERIC_ICON,
        }
    }

    /// Returns true for user supplied categories.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Self::parse(&key)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(key) => key,
            other => other.key().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single expense paid by one traveler on behalf of the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// What was bought.
    pub description: String,
    /// Amount in `currency`, always positive.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// Expense category.
    pub category: Category,
    /// Name of the traveler who paid.
    pub paid_by: String,
    /// When the expense happened.
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    /// Amount paired with its currency.
    #[must_use]
    pub fn money(&self) -> Money {
        Money::new(self.amount, self.currency.clone())
    }
}

/// Input for creating a trip.
#[derive(Debug, Clone)]
pub struct CreateTripInput {
    /// Trip name.
    pub name: String,
    /// Destination.
    pub destination: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Default currency.
    pub currency: CurrencyCode,
}

/// Input for updating trip metadata. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTripInput {
    /// New name.
    pub name: Option<String>,
    /// New destination.
    pub destination: Option<String>,
    /// New first day.
    pub start_date: Option<NaiveDate>,
    /// New last day.
    pub end_date: Option<NaiveDate>,
    /// New default currency.
    pub currency: Option<CurrencyCode>,
}

/// Input for adding a traveler.
#[derive(Debug, Clone)]
pub struct CreateTravelerInput {
    /// Traveler name.
    pub name: String,
    /// Optional email; blank strings are dropped.
    pub email: Option<String>,
}

/// Input for adding an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// What was bought.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Currency; defaults to the trip currency.
    pub currency: Option<CurrencyCode>,
    /// Category key or free text.
    pub category: String,
    /// Name of the paying traveler.
    pub paid_by: String,
    /// When it happened; defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
}
