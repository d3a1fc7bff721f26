//! Property-based tests for settlement.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::SettlementEngine;
use super::types::BalanceStatus;
use crate::testing::{ledger, rates, spend};

const TRAVELERS: [&str; 5] = ["Alice", "Bob", "Carol", "Dave", "Erin"];

fn expenses() -> impl Strategy<Value = Vec<(Decimal, &'static str, usize)>> {
    prop::collection::vec(
        (
            (1i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
            prop::sample::select(vec!["USD", "EUR", "JPY", "GBP", "XXX"]),
            0..TRAVELERS.len(),
        ),
        0..30,
    )
}

fn tolerance() -> Decimal {
    Decimal::new(1, 6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balances sum to zero and paid amounts sum to the grand total.
    #[test]
    fn prop_balances_conserve(
        count in 1usize..=TRAVELERS.len(),
        spent in expenses(),
    ) {
        let mut ledger = ledger("USD", &TRAVELERS[..count]);
        for (amount, currency, payer) in &spent {
            spend(&mut ledger, *amount, currency, "food", TRAVELERS[payer % count]);
        }

        let report = SettlementEngine::default().compute_split_report(&ledger, &rates()).unwrap();
        let balance_sum: Decimal = report.balances.iter().map(|b| b.balance).sum();
        let paid_sum: Decimal = report.balances.iter().map(|b| b.paid).sum();

        prop_assert_eq!(report.balances.len(), count);
        prop_assert!(balance_sum.abs() <= tolerance(), "balances sum to {}", balance_sum);
        prop_assert!((paid_sum - report.grand_total).abs() <= tolerance());
    }

    /// Applying the planned transfers leaves every traveler within epsilon.
    #[test]
    fn prop_transfers_settle_everyone(
        count in 1usize..=TRAVELERS.len(),
        spent in expenses(),
    ) {
        let mut ledger = ledger("EUR", &TRAVELERS[..count]);
        for (amount, currency, payer) in &spent {
            spend(&mut ledger, *amount, currency, "transport", TRAVELERS[payer % count]);
        }

        let engine = SettlementEngine::default();
        let report = engine.compute_split_report(&ledger, &rates()).unwrap();

        let mut remaining: Vec<(String, Decimal)> = report
            .balances
            .iter()
            .map(|b| (b.person.clone(), b.balance))
            .collect();
        for transfer in &report.transfers {
            prop_assert!(transfer.amount > Decimal::ZERO);
            for (person, balance) in &mut remaining {
                if *person == transfer.from {
                    *balance += transfer.amount;
                } else if *person == transfer.to {
                    *balance -= transfer.amount;
                }
            }
        }

        for (person, balance) in remaining {
            prop_assert_eq!(
                BalanceStatus::classify(balance, engine.epsilon()),
                BalanceStatus::Settled,
                "{} left at {}", person, balance
            );
        }
        prop_assert!(report.transfers.is_empty() || report.transfers.len() < count);
    }

    /// Status always agrees with the sign of the balance.
    #[test]
    fn prop_status_matches_balance(
        count in 1usize..=TRAVELERS.len(),
        spent in expenses(),
    ) {
        let mut ledger = ledger("GBP", &TRAVELERS[..count]);
        for (amount, currency, payer) in &spent {
            spend(&mut ledger, *amount, currency, "other", TRAVELERS[payer % count]);
        }

        let engine = SettlementEngine::default();
        let report = engine.compute_split_report(&ledger, &rates()).unwrap();
        for balance in &report.balances {
            prop_assert_eq!(balance.status, BalanceStatus::classify(balance.balance, engine.epsilon()));
        }
        prop_assert!(report.balances.windows(2).all(|w| w[0].balance >= w[1].balance));
    }
}
