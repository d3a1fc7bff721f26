//! Report data types.
//!
//! Amounts are carried at full precision; call `rounded` with a
//! [`DisplayPolicy`] to get the presentation copy.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::CurrencyCode;

use crate::currency::DisplayPolicy;
use crate::ledger::Category;

/// Trip-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    /// Trip currency every converted figure is expressed in.
    pub currency: CurrencyCode,
    /// Unconverted sum per transacted currency.
    pub total_by_currency: BTreeMap<CurrencyCode, Decimal>,
    /// Every expense converted to the trip currency and summed.
    pub grand_total_in_default_currency: Decimal,
    /// True when at least one expense was carried over 1:1 for lack of a rate.
    pub is_approximate: bool,
    /// Currencies that had no rate.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub approximate_currencies: BTreeSet<CurrencyCode>,
    /// Number of expenses.
    pub expense_count: usize,
    /// Grand total divided by expense count, 0 when there are none.
    pub average_expense: Decimal,
}

impl TripSummary {
    /// Presentation copy with amounts rounded.
    #[must_use]
    pub fn rounded(&self, policy: &DisplayPolicy) -> Self {
        Self {
            currency: self.currency.clone(),
            total_by_currency: round_map(&self.total_by_currency, policy),
            grand_total_in_default_currency: policy.amount(self.grand_total_in_default_currency),
            is_approximate: self.is_approximate,
            approximate_currencies: self.approximate_currencies.clone(),
            expense_count: self.expense_count,
            average_expense: policy.amount(self.average_expense),
        }
    }
}

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLine {
    /// Category key.
    pub category: Category,
    /// Display label.
    pub label: String,
    /// Display icon.
    pub icon: String,
    /// Converted total in the trip currency.
    pub amount: Decimal,
    /// Share of the grand total, 0 to 100.
    pub percentage: Decimal,
    /// Unconverted totals per transacted currency.
    pub currency_breakdown: BTreeMap<CurrencyCode, Decimal>,
}

impl CategoryLine {
    /// Presentation copy with amounts and percentage rounded.
    #[must_use]
    pub fn rounded(&self, policy: &DisplayPolicy) -> Self {
        Self {
            category: self.category.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            amount: policy.amount(self.amount),
            percentage: policy.percentage(self.percentage),
            currency_breakdown: round_map(&self.currency_breakdown, policy),
        }
    }
}

/// One row of the per-payer breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonLine {
    /// Traveler name.
    pub person: String,
    /// Converted total paid, in the trip currency.
    pub amount: Decimal,
    /// Share of the grand total, 0 to 100.
    pub percentage: Decimal,
    /// Number of expenses paid.
    pub expense_count: usize,
}

impl PersonLine {
    /// Presentation copy with amount and percentage rounded.
    #[must_use]
    pub fn rounded(&self, policy: &DisplayPolicy) -> Self {
        Self {
            person: self.person.clone(),
            amount: policy.amount(self.amount),
            percentage: policy.percentage(self.percentage),
            expense_count: self.expense_count,
        }
    }
}

/// One calendar day of spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLine {
    /// Day (UTC).
    pub date: NaiveDate,
    /// Expenses on that day.
    pub expense_count: usize,
    /// Converted total in the trip currency.
    pub total: Decimal,
}

impl DailyLine {
    /// Presentation copy with the total rounded.
    #[must_use]
    pub fn rounded(&self, policy: &DisplayPolicy) -> Self {
        Self {
            date: self.date,
            expense_count: self.expense_count,
            total: policy.amount(self.total),
        }
    }
}

fn round_map(
    map: &BTreeMap<CurrencyCode, Decimal>,
    policy: &DisplayPolicy,
) -> BTreeMap<CurrencyCode, Decimal> {
    map.iter()
        .map(|(code, amount)| (code.clone(), policy.amount(*amount)))
        .collect()
}
