//! Activity log of ledger mutations.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::{CurrencyCode, ExpenseId, TripId};

use super::types::{Category, Expense, Traveler, Trip};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActivityAction {
    /// A trip was created.
    TripCreated {
        /// Trip name.
        trip_name: String,
        /// Destination.
        destination: String,
        /// Default currency.
        currency: CurrencyCode,
        /// First day.
        start_date: NaiveDate,
        /// Last day.
        end_date: NaiveDate,
    },
    /// Trip metadata changed.
    TripUpdated {
        /// Trip name after the update.
        trip_name: String,
    },
    /// A traveler joined.
    TravelerAdded {
        /// Traveler name.
        name: String,
        /// Traveler email.
        email: Option<String>,
    },
    /// An expense was recorded.
    ExpenseAdded {
        /// Expense ID.
        expense_id: ExpenseId,
        /// Description.
        description: String,
        /// Amount.
        amount: Decimal,
        /// Currency.
        currency: CurrencyCode,
        /// Category.
        category: Category,
        /// Payer name.
        paid_by: String,
    },
    /// An expense was removed.
    ExpenseDeleted {
        /// Expense ID.
        expense_id: ExpenseId,
    },
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// Trip it happened on.
    pub trip_id: TripId,
    /// What happened.
    #[serde(flatten)]
    pub action: ActivityAction,
}

/// Per-trip rollup of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripActivitySummary {
    /// Trip name at creation.
    pub trip_name: String,
    /// Destination at creation.
    pub destination: String,
    /// When the trip was created.
    pub created: DateTime<Utc>,
    /// Expenses added (deletions are not subtracted).
    pub expense_count: usize,
    /// Travelers added.
    pub traveler_count: usize,
    /// Most recent counted activity.
    pub last_activity: DateTime<Utc>,
}

/// Append-only log of mutations, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn record(&mut self, trip_id: TripId, action: ActivityAction, timestamp: DateTime<Utc>) {
        tracing::debug!(%trip_id, ?action, "activity recorded");
        self.entries.push(ActivityEntry {
            timestamp,
            trip_id,
            action,
        });
    }

    /// Records trip creation.
    pub fn trip_created(&mut self, trip: &Trip) {
        self.record(
            trip.id,
            ActivityAction::TripCreated {
                trip_name: trip.name.clone(),
                destination: trip.destination.clone(),
                currency: trip.currency.clone(),
                start_date: trip.start_date,
                end_date: trip.end_date,
            },
            trip.created_at,
        );
    }

    /// Records a traveler joining.
    pub fn traveler_added(&mut self, trip_id: TripId, traveler: &Traveler) {
        self.record(
            trip_id,
            ActivityAction::TravelerAdded {
                name: traveler.name.clone(),
                email: traveler.email.clone(),
            },
            Utc::now(),
        );
    }

    /// Records a new expense, stamped with the expense's own time.
    pub fn expense_added(&mut self, trip_id: TripId, expense: &Expense) {
        self.record(
            trip_id,
            ActivityAction::ExpenseAdded {
                expense_id: expense.id,
                description: expense.description.clone(),
                amount: expense.amount,
                currency: expense.currency.clone(),
                category: expense.category.clone(),
                paid_by: expense.paid_by.clone(),
            },
            expense.timestamp,
        );
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one trip, oldest first.
    pub fn trip_history(&self, trip_id: TripId) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().filter(move |e| e.trip_id == trip_id)
    }

    /// The `limit` most recent entries, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&ActivityEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Appends another log's entries, keeping chronological order.
    pub fn merge(&mut self, other: &Self) {
        self.entries.extend(other.entries.iter().cloned());
        self.entries.sort_by_key(|e| e.timestamp);
    }

    /// Rolls the log up per trip.
    ///
    /// Only trips whose creation is in the log appear; activity for unknown
    /// trips is ignored.
    #[must_use]
    pub fn trip_summaries(&self) -> BTreeMap<TripId, TripActivitySummary> {
        let mut summaries: BTreeMap<TripId, TripActivitySummary> = BTreeMap::new();

        for entry in &self.entries {
            match &entry.action {
                ActivityAction::TripCreated {
                    trip_name,
                    destination,
                    ..
                } => {
                    summaries
                        .entry(entry.trip_id)
                        .or_insert_with(|| TripActivitySummary {
                            trip_name: trip_name.clone(),
                            destination: destination.clone(),
                            created: entry.timestamp,
                            expense_count: 0,
                            traveler_count: 0,
                            last_activity: entry.timestamp,
                        });
                }
                ActivityAction::ExpenseAdded { .. } => {
                    if let Some(summary) = summaries.get_mut(&entry.trip_id) {
                        summary.expense_count += 1;
                        summary.last_activity = entry.timestamp;
                    }
                }
                ActivityAction::TravelerAdded { .. } => {
                    if let Some(summary) = summaries.get_mut(&entry.trip_id) {
                        summary.traveler_count += 1;
                        summary.last_activity = entry.timestamp;
                    }
                }
                ActivityAction::TripUpdated { .. } | ActivityAction::ExpenseDeleted { .. } => {}
            }
        }

        summaries
    }
}
