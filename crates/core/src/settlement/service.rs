//! Settlement computation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tripsplit_shared::config::SettlementConfig;

use super::error::SettlementError;
use super::types::{BalanceStatus, SplitReport, Transfer, TravelerBalance};
use crate::currency::ExchangeRateTable;
use crate::ledger::ExpenseLedger;
use crate::reports::AggregationEngine;

/// Computes equal-split balances and settlement transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementEngine {
    epsilon: Decimal,
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self {
            epsilon: Decimal::new(1, 2),
        }
    }
}

impl From<&SettlementConfig> for SettlementEngine {
    fn from(config: &SettlementConfig) -> Self {
        Self::new(config.epsilon)
    }
}

impl SettlementEngine {
    /// Creates an engine that treats balances within `epsilon` of zero as settled.
    ///
    /// Negative values are taken by magnitude.
    #[must_use]
    pub fn new(epsilon: Decimal) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    /// Tolerance used for classification and transfer planning.
    #[must_use]
    pub const fn epsilon(&self) -> Decimal {
        self.epsilon
    }

    /// Splits the converted grand total equally between all travelers.
    ///
    /// Travelers who paid nothing still carry a fair share. Balances are
    /// ordered highest first, ties by name.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::NoTravelers` for a trip without travelers.
    pub fn compute_split_report(
        &self,
        ledger: &ExpenseLedger,
        rates: &ExchangeRateTable,
    ) -> Result<SplitReport, SettlementError> {
        let travelers = ledger.travelers();
        if travelers.is_empty() {
            tracing::debug!(trip_id = %ledger.trip().id, "split requested for trip without travelers");
            return Err(SettlementError::NoTravelers);
        }

        let mut paid: BTreeMap<&str, Decimal> = travelers
            .iter()
            .map(|t| (t.name.as_str(), Decimal::ZERO))
            .collect();
        let mut grand_total = Decimal::ZERO;
        let mut is_approximate = false;

        for (expense, converted) in AggregationEngine::converted(ledger, rates) {
            *paid.entry(expense.paid_by.as_str()).or_insert(Decimal::ZERO) += converted.amount;
            grand_total += converted.amount;
            is_approximate |= converted.is_approximate();
        }

        let traveler_count = travelers.len();
        let fair_share = grand_total / Decimal::from(traveler_count);

        let mut balances: Vec<TravelerBalance> = paid
            .into_iter()
            .map(|(person, paid)| {
                let balance = paid - fair_share;
                TravelerBalance {
                    person: person.to_string(),
                    paid,
                    fair_share,
                    balance,
                    status: BalanceStatus::classify(balance, self.epsilon),
                }
            })
            .collect();
        balances.sort_by(|a, b| b.balance.cmp(&a.balance).then_with(|| a.person.cmp(&b.person)));

        let transfers = self.plan_transfers(&balances);

        tracing::debug!(
            currency = %ledger.currency(),
            traveler_count,
            %grand_total,
            %fair_share,
            transfers = transfers.len(),
            "split computed"
        );

        Ok(SplitReport {
            currency: ledger.currency().clone(),
            grand_total,
            fair_share,
            traveler_count,
            is_approximate,
            balances,
            transfers,
        })
    }

    /// Greedy settlement: the largest creditor is paid by the largest debtor
    /// until every remaining balance is within epsilon.
    ///
    /// Travelers already within epsilon still take part while someone on the
    /// other side is outside it, so their slack cannot pile up on one person.
    /// Each step zeroes at least one side, so the plan has fewer transfers
    /// than there are travelers with a non-zero balance.
    #[must_use]
    pub fn plan_transfers(&self, balances: &[TravelerBalance]) -> Vec<Transfer> {
        let mut creditors: Vec<(&str, Decimal)> = balances
            .iter()
            .filter(|b| b.balance > Decimal::ZERO)
            .map(|b| (b.person.as_str(), b.balance))
            .collect();
        let mut debtors: Vec<(&str, Decimal)> = balances
            .iter()
            .filter(|b| b.balance < Decimal::ZERO)
            .map(|b| (b.person.as_str(), -b.balance))
            .collect();

        let mut transfers = Vec::new();
        while let (Some(creditor), Some(debtor)) = (largest(&creditors), largest(&debtors)) {
            if creditors[creditor].1 <= self.epsilon && debtors[debtor].1 <= self.epsilon {
                break;
            }

            let amount = creditors[creditor].1.min(debtors[debtor].1);
            transfers.push(Transfer {
                from: debtors[debtor].0.to_string(),
                to: creditors[creditor].0.to_string(),
                amount,
            });
            creditors[creditor].1 -= amount;
            debtors[debtor].1 -= amount;
        }

        transfers
    }
}

/// Index of the largest remaining amount above zero; first wins on ties.
fn largest(side: &[(&str, Decimal)]) -> Option<usize> {
    side.iter()
        .enumerate()
        .filter(|(_, (_, amount))| *amount > Decimal::ZERO)
        .fold(None, |best: Option<(usize, Decimal)>, (index, (_, amount))| match best {
            Some((_, top)) if top >= *amount => best,
            _ => Some((index, *amount)),
        })
        .map(|(index, _)| index)
}
