//! Fixtures shared by the report and settlement tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tripsplit_shared::types::CurrencyCode;

use crate::currency::ExchangeRateTable;
use crate::ledger::{CreateExpenseInput, CreateTravelerInput, CreateTripInput, ExpenseLedger};

pub fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s)
}

/// USD-based snapshot: EUR 0.8, GBP 0.75, JPY 150, THB 35.
pub fn rates() -> ExchangeRateTable {
    ExchangeRateTable::new(
        code("USD"),
        BTreeMap::from([
            (code("EUR"), dec!(0.8)),
            (code("GBP"), dec!(0.75)),
            (code("JPY"), dec!(150)),
            (code("THB"), dec!(35)),
        ]),
    )
    .unwrap()
}

/// A trip in `currency` with the given travelers and no expenses.
pub fn ledger(currency: &str, travelers: &[&str]) -> ExpenseLedger {
    let mut ledger = ExpenseLedger::create(CreateTripInput {
        name: "Test trip".into(),
        destination: "Somewhere".into(),
        start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 6, 14).unwrap(),
        currency: code(currency),
    })
    .unwrap();
    for name in travelers {
        ledger
            .add_traveler(CreateTravelerInput {
                name: (*name).to_string(),
                email: None,
            })
            .unwrap();
    }
    ledger
}

/// Adds an expense, panicking if the ledger rejects it.
pub fn spend(
    ledger: &mut ExpenseLedger,
    amount: Decimal,
    currency: &str,
    category: &str,
    paid_by: &str,
) {
    ledger
        .add_expense(CreateExpenseInput {
            description: format!("{category} by {paid_by}"),
            amount,
            currency: Some(code(currency)),
            category: category.into(),
            paid_by: paid_by.into(),
            timestamp: None,
        })
        .unwrap();
}
