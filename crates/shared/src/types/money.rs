//! Money and currency code types with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts wrap `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display metadata for a currency the trip forms offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Human readable name.
    pub name: &'static str,
}

/// Currencies offered when creating trips and expenses.
pub const SUPPORTED_CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", name: "US Dollar" },
    CurrencyInfo { code: "EUR", name: "Euro" },
    CurrencyInfo { code: "GBP", name: "British Pound" },
    CurrencyInfo { code: "JPY", name: "Japanese Yen" },
    CurrencyInfo { code: "AUD", name: "Australian Dollar" },
    CurrencyInfo { code: "CAD", name: "Canadian Dollar" },
    CurrencyInfo { code: "CHF", name: "Swiss Franc" },
    CurrencyInfo { code: "CNY", name: "Chinese Yuan" },
    CurrencyInfo { code: "INR", name: "Indian Rupee" },
    CurrencyInfo { code: "KRW", name: "South Korean Won" },
    CurrencyInfo { code: "SGD", name: "Singapore Dollar" },
    CurrencyInfo { code: "HKD", name: "Hong Kong Dollar" },
    CurrencyInfo { code: "MXN", name: "Mexican Peso" },
    CurrencyInfo { code: "BRL", name: "Brazilian Real" },
    CurrencyInfo { code: "ZAR", name: "South African Rand" },
    CurrencyInfo { code: "THB", name: "Thai Baht" },
    CurrencyInfo { code: "MYR", name: "Malaysian Ringgit" },
    CurrencyInfo { code: "IDR", name: "Indonesian Rupiah" },
    CurrencyInfo { code: "PHP", name: "Philippine Peso" },
    CurrencyInfo { code: "VND", name: "Vietnamese Dong" },
    CurrencyInfo { code: "NZD", name: "New Zealand Dollar" },
    CurrencyInfo { code: "SEK", name: "Swedish Krona" },
    CurrencyInfo { code: "NOK", name: "Norwegian Krone" },
    CurrencyInfo { code: "DKK", name: "Danish Krone" },
    CurrencyInfo { code: "PLN", name: "Polish Zloty" },
    CurrencyInfo { code: "CZK", name: "Czech Koruna" },
    CurrencyInfo { code: "HUF", name: "Hungarian Forint" },
    CurrencyInfo { code: "TRY", name: "Turkish Lira" },
    CurrencyInfo { code: "AED", name: "UAE Dirham" },
    CurrencyInfo { code: "SAR", name: "Saudi Riyal" },
];

/// A currency code, normalized to upper case.
///
/// Codes outside [`SUPPORTED_CURRENCIES`] are still representable: they pass
/// through the engines unconverted instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a code, trimming and upper-casing the input.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code belongs to the supported currency set.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.info().is_some()
    }

    /// Returns display metadata for supported codes.
    #[must_use]
    pub fn info(&self) -> Option<&'static CurrencyInfo> {
        SUPPORTED_CURRENCIES.iter().find(|c| c.code == self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Malformed currency code: {s}"));
        }
        Ok(Self::new(trimmed))
    }
}

/// Represents a monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g. dollars, not cents).
    pub amount: Decimal,
    /// Currency the amount is denominated in.
    pub currency: CurrencyCode,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
