//! Settlement data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::CurrencyCode;

use crate::currency::DisplayPolicy;

/// Where a traveler stands against the fair share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    /// Paid more than the fair share; others owe them.
    Owed,
    /// Paid less than the fair share.
    Owes,
    /// Within epsilon of the fair share.
    Settled,
}

impl BalanceStatus {
    /// Classifies a balance against `epsilon`.
    #[must_use]
    pub fn classify(balance: Decimal, epsilon: Decimal) -> Self {
        if balance > epsilon {
            Self::Owed
        } else if balance < -epsilon {
            Self::Owes
        } else {
            Self::Settled
        }
    }
}

/// One traveler's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerBalance {
    /// Traveler name.
    pub person: String,
    /// Converted total this traveler paid.
    pub paid: Decimal,
    /// Equal share of the grand total.
    pub fair_share: Decimal,
    /// `paid - fair_share`.
    pub balance: Decimal,
    /// Classification of `balance`.
    pub status: BalanceStatus,
}

/// A payment that moves money from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Debtor.
    pub from: String,
    /// Creditor.
    pub to: String,
    /// Amount in the trip currency.
    pub amount: Decimal,
}

/// Fair-share split of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitReport {
    /// Trip currency.
    pub currency: CurrencyCode,
    /// Converted grand total.
    pub grand_total: Decimal,
    /// `grand_total / traveler_count`.
    pub fair_share: Decimal,
    /// Number of travelers sharing the cost.
    pub traveler_count: usize,
    /// True when some expense was converted with a 1:1 fallback.
    pub is_approximate: bool,
    /// Per-traveler balances, highest balance first.
    pub balances: Vec<TravelerBalance>,
    /// Suggested transfers that bring every balance within epsilon.
    pub transfers: Vec<Transfer>,
}

impl SplitReport {
    /// Presentation copy with amounts rounded.
    #[must_use]
    pub fn rounded(&self, policy: &DisplayPolicy) -> Self {
        Self {
            currency: self.currency.clone(),
            grand_total: policy.amount(self.grand_total),
            fair_share: policy.amount(self.fair_share),
            traveler_count: self.traveler_count,
            is_approximate: self.is_approximate,
            balances: self
                .balances
                .iter()
                .map(|b| TravelerBalance {
                    person: b.person.clone(),
                    paid: policy.amount(b.paid),
                    fair_share: policy.amount(b.fair_share),
                    balance: policy.amount(b.balance),
                    status: b.status,
                })
                .collect(),
            transfers: self
                .transfers
                .iter()
                .map(|t| Transfer {
                    from: t.from.clone(),
                    to: t.to.clone(),
                    amount: policy.amount(t.amount),
                })
                .collect(),
        }
    }

    /// Balance of one traveler.
    #[must_use]
    pub fn balance_of(&self, person: &str) -> Option<&TravelerBalance> {
        self.balances.iter().find(|b| b.person == person)
    }
}
