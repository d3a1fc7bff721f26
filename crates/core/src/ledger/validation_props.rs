//! Property-based tests for expense validation and ledger mutation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tripsplit_shared::types::{CurrencyCode, TravelerId};

use super::error::{InvalidExpenseInput, LedgerError};
use super::service::ExpenseLedger;
use super::types::{CreateExpenseInput, CreateTravelerInput, CreateTripInput, Traveler};
use super::validation::validate_expense;

const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a zero or negative amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn travelers() -> Vec<Traveler> {
    NAMES
        .iter()
        .map(|name| Traveler {
            id: TravelerId::new(),
            name: (*name).to_string(),
            email: None,
        })
        .collect()
}

fn ledger() -> ExpenseLedger {
    let mut ledger = ExpenseLedger::create(CreateTripInput {
        name: "Road trip".into(),
        destination: "Iceland".into(),
        start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
        currency: CurrencyCode::new("ISK"),
    })
    .unwrap();
    for name in NAMES {
        ledger
            .add_traveler(CreateTravelerInput {
                name: name.into(),
                email: None,
            })
            .unwrap();
    }
    ledger
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Non-positive amounts are rejected whatever the other fields hold.
    #[test]
    fn prop_non_positive_amount_rejected(
        amount in non_positive_amount(),
        payer in prop::sample::select(NAMES.to_vec()),
        description in "[a-zA-Z ]{0,20}",
    ) {
        let result = validate_expense(&description, amount, "food", payer, &travelers());
        prop_assert_eq!(result, Err(InvalidExpenseInput::NonPositiveAmount(amount)));
    }

    /// Positive amounts with a known payer and non-blank text are accepted.
    #[test]
    fn prop_valid_expense_accepted(
        amount in positive_amount(),
        payer in prop::sample::select(NAMES.to_vec()),
        description in "[a-zA-Z]{1,20}",
        category in "[a-z]{1,12}",
    ) {
        prop_assert!(validate_expense(&description, amount, &category, payer, &travelers()).is_ok());
    }

    /// Payers outside the traveler set are always rejected.
    #[test]
    fn prop_unknown_payer_rejected(
        amount in positive_amount(),
        payer in "[a-z]{1,10}",
    ) {
        // lowercase names never collide with the capitalized travelers
        let result = validate_expense("Taxi", amount, "transport", &payer, &travelers());
        prop_assert_eq!(result, Err(InvalidExpenseInput::UnknownPayer(payer)));
    }

    /// Every expense in the ledger names an existing traveler and has a positive amount,
    /// after any mix of accepted and rejected inputs.
    #[test]
    fn prop_ledger_invariants_hold(
        inputs in prop::collection::vec(
            (
                -1_000i64..100_000i64,
                prop::sample::select(vec!["Alice", "Bob", "Carol", "Dave", "Mallory"]),
            ),
            0..30,
        ),
    ) {
        let mut ledger = ledger();
        let mut accepted = 0usize;

        for (cents, payer) in inputs {
            let result = ledger.add_expense(CreateExpenseInput {
                description: "Item".into(),
                amount: Decimal::new(cents, 2),
                currency: None,
                category: "other".into(),
                paid_by: payer.into(),
                timestamp: None,
            });
            match result {
                Ok(_) => accepted += 1,
                Err(err) => prop_assert!(matches!(err, LedgerError::InvalidExpense(_))),
            }
        }

        prop_assert_eq!(ledger.expenses().len(), accepted);
        for expense in ledger.expenses() {
            prop_assert!(expense.amount > Decimal::ZERO);
            prop_assert!(ledger.traveler(&expense.paid_by).is_some());
        }
    }
}
