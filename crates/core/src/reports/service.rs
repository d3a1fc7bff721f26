//! Aggregation over a ledger snapshot.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tripsplit_shared::types::CurrencyCode;

use super::types::{CategoryLine, DailyLine, PersonLine, TripSummary};
use crate::currency::{Converted, CurrencyConverter, ExchangeRateTable};
use crate::ledger::{Category, Expense, ExpenseLedger};

/// Computes totals and breakdowns in the trip currency.
///
/// Every function takes the ledger and rate snapshot it works on; nothing is
/// cached between calls.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Trip-wide totals.
    ///
    /// Expenses whose currency has no rate are added 1:1 and the summary is
    /// marked approximate.
    #[must_use]
    pub fn compute_summary(ledger: &ExpenseLedger, rates: &ExchangeRateTable) -> TripSummary {
        let currency = ledger.currency();
        let mut total_by_currency: BTreeMap<CurrencyCode, Decimal> = BTreeMap::new();
        let mut approximate_currencies = BTreeSet::new();
        let mut grand_total = Decimal::ZERO;

        for (expense, converted) in Self::converted(ledger, rates) {
            *total_by_currency
                .entry(expense.currency.clone())
                .or_insert(Decimal::ZERO) += expense.amount;
            if converted.is_approximate() {
                approximate_currencies.insert(expense.currency.clone());
            }
            grand_total += converted.amount;
        }

        let expense_count = ledger.expenses().len();
        let average_expense = if expense_count == 0 {
            Decimal::ZERO
        } else {
            grand_total / Decimal::from(expense_count)
        };

        tracing::debug!(
            %currency,
            expense_count,
            %grand_total,
            approximate = !approximate_currencies.is_empty(),
            "summary computed"
        );

        TripSummary {
            currency: currency.clone(),
            total_by_currency,
            grand_total_in_default_currency: grand_total,
            is_approximate: !approximate_currencies.is_empty(),
            approximate_currencies,
            expense_count,
            average_expense,
        }
    }

    /// Per-category totals, largest first.
    #[must_use]
    pub fn compute_category_report(
        ledger: &ExpenseLedger,
        rates: &ExchangeRateTable,
    ) -> Vec<CategoryLine> {
        let mut totals: BTreeMap<&Category, (Decimal, BTreeMap<CurrencyCode, Decimal>)> =
            BTreeMap::new();
        let mut grand_total = Decimal::ZERO;

        for (expense, converted) in Self::converted(ledger, rates) {
            let (amount, breakdown) = totals.entry(&expense.category).or_default();
            *amount += converted.amount;
            *breakdown
                .entry(expense.currency.clone())
                .or_insert(Decimal::ZERO) += expense.amount;
            grand_total += converted.amount;
        }

        let mut lines: Vec<CategoryLine> = totals
            .into_iter()
            .map(|(category, (amount, currency_breakdown))| CategoryLine {
                category: category.clone(),
                label: category.label().to_string(),
                icon: category.icon().to_string(),
                amount,
                percentage: percentage(amount, grand_total),
                currency_breakdown,
            })
            .collect();

        lines.sort_by(|a, b| by_amount_desc(a.amount, b.amount).then_with(|| a.category.cmp(&b.category)));
        tracing::debug!(categories = lines.len(), %grand_total, "category report computed");
        lines
    }

    /// Per-payer totals, largest first.
    ///
    /// Only travelers who paid for something appear.
    #[must_use]
    pub fn compute_people_report(
        ledger: &ExpenseLedger,
        rates: &ExchangeRateTable,
    ) -> Vec<PersonLine> {
        let mut totals: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
        let mut grand_total = Decimal::ZERO;

        for (expense, converted) in Self::converted(ledger, rates) {
            let (amount, count) = totals.entry(expense.paid_by.as_str()).or_default();
            *amount += converted.amount;
            *count += 1;
            grand_total += converted.amount;
        }

        let mut lines: Vec<PersonLine> = totals
            .into_iter()
            .map(|(person, (amount, expense_count))| PersonLine {
                person: person.to_string(),
                amount,
                percentage: percentage(amount, grand_total),
                expense_count,
            })
            .collect();

        lines.sort_by(|a, b| by_amount_desc(a.amount, b.amount).then_with(|| a.person.cmp(&b.person)));
        tracing::debug!(people = lines.len(), %grand_total, "people report computed");
        lines
    }

    /// Per-day totals in date order.
    #[must_use]
    pub fn compute_daily_report(
        ledger: &ExpenseLedger,
        rates: &ExchangeRateTable,
    ) -> Vec<DailyLine> {
        let mut days: BTreeMap<NaiveDate, (usize, Decimal)> = BTreeMap::new();

        for (expense, converted) in Self::converted(ledger, rates) {
            let (count, total) = days.entry(expense.timestamp.date_naive()).or_default();
            *count += 1;
            *total += converted.amount;
        }

        days.into_iter()
            .map(|(date, (expense_count, total))| DailyLine {
                date,
                expense_count,
                total,
            })
            .collect()
    }

    /// Each expense paired with its amount in the trip currency.
    pub(crate) fn converted<'a>(
        ledger: &'a ExpenseLedger,
        rates: &'a ExchangeRateTable,
    ) -> impl Iterator<Item = (&'a Expense, Converted)> + 'a {
        let target = ledger.currency();
        ledger.expenses().iter().map(move |expense| {
            let converted =
                CurrencyConverter::convert_or_fallback(expense.amount, &expense.currency, target, rates);
            (expense, converted)
        })
    }
}

/// `100 * part / total`, 0 when the total is 0.
fn percentage(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::ONE_HUNDRED * part / total
    }
}

fn by_amount_desc(a: Decimal, b: Decimal) -> Ordering {
    b.cmp(&a)
}
