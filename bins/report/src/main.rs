//! Tripsplit report host
//!
//! Loads the ledger and exchange rate snapshots, runs the report engines and
//! prints the result as JSON on stdout. Logs go to stderr.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tripsplit_core::currency::{CurrencyConverter, DisplayPolicy, ExchangeRateTable, QuickConversion};
use tripsplit_core::ledger::{ExpenseLedger, Trip, TripActivitySummary};
use tripsplit_core::reports::{AggregationEngine, CategoryLine, DailyLine, PersonLine, TripSummary};
use tripsplit_core::settlement::{SettlementEngine, SplitReport};
use tripsplit_shared::config::{LoggingConfig, PreferenceConfig};
use tripsplit_shared::types::CurrencyCode;
use tripsplit_shared::{AppConfig, AppError};

/// Everything the host prints for one trip.
#[derive(Debug, Serialize)]
struct TripReport {
    trip: Trip,
    generated_at: DateTime<Utc>,
    rates_stale: bool,
    summary: TripSummary,
    categories: Vec<CategoryLine>,
    people: Vec<PersonLine>,
    daily: Vec<DailyLine>,
    split: SplitOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    quick_convert: Option<QuickConversion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity: Option<TripActivitySummary>,
}

/// The split, or why there is none.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SplitOutcome {
    Ready(SplitReport),
    Unavailable { reason: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let (ledger, rates) = tokio::try_join!(
        read_snapshot::<ExpenseLedger>(&config.snapshot.ledger_path),
        read_snapshot::<ExchangeRateTable>(&config.snapshot.rates_path),
    )?;
    info!(
        trip = %ledger.trip().name,
        expenses = ledger.expenses().len(),
        rates = rates.len(),
        base = %rates.base(),
        "snapshots loaded"
    );

    let report = build_report(&config, &ledger, &rates, Utc::now());
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );

    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

async fn read_snapshot<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .map_err(AppError::from)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

fn build_report(
    config: &AppConfig,
    ledger: &ExpenseLedger,
    rates: &ExchangeRateTable,
    now: DateTime<Utc>,
) -> TripReport {
    let policy = DisplayPolicy::from(&config.settlement);

    let rates_stale = rates.is_stale(now, Duration::hours(i64::from(config.rates.max_age_hours)));
    if rates_stale {
        warn!(
            fetched_at = ?rates.fetched_at(),
            max_age_hours = config.rates.max_age_hours,
            "exchange rate snapshot is stale"
        );
    }

    let summary = AggregationEngine::compute_summary(ledger, rates);
    if summary.is_approximate {
        warn!(currencies = ?summary.approximate_currencies, "totals include 1:1 fallback conversions");
    }

    let split = match SettlementEngine::from(&config.settlement).compute_split_report(ledger, rates)
    {
        Ok(split) => SplitOutcome::Ready(split.rounded(&policy)),
        Err(err) => {
            info!(error = %err, "split unavailable");
            SplitOutcome::Unavailable {
                reason: err.to_string(),
            }
        }
    };

    let quick_convert = quick_convert(&config.preference, &summary, rates);

    TripReport {
        trip: ledger.trip().clone(),
        generated_at: now,
        rates_stale,
        categories: AggregationEngine::compute_category_report(ledger, rates)
            .iter()
            .map(|line| line.rounded(&policy))
            .collect(),
        people: AggregationEngine::compute_people_report(ledger, rates)
            .iter()
            .map(|line| line.rounded(&policy))
            .collect(),
        daily: AggregationEngine::compute_daily_report(ledger, rates)
            .iter()
            .map(|line| line.rounded(&policy))
            .collect(),
        summary: summary.rounded(&policy),
        split,
        quick_convert: quick_convert.map(|q| QuickConversion {
            amount: policy.amount(q.amount),
            converted_amount: policy.amount(q.converted_amount),
            ..q
        }),
        activity: ledger
            .activity()
            .trip_summaries()
            .remove(&ledger.trip().id),
    }
}

/// Applies the persisted quick-convert pair to the grand total.
///
/// The source currency defaults to the trip currency, and the grand total is
/// first expressed in it. Without a target currency there is no annotation;
/// a missing rate skips it with a warning.
fn quick_convert(
    preference: &PreferenceConfig,
    summary: &TripSummary,
    rates: &ExchangeRateTable,
) -> Option<QuickConversion> {
    let to = CurrencyCode::new(preference.to_currency.as_deref()?);
    let from = preference
        .from_currency
        .as_deref()
        .map_or_else(|| summary.currency.clone(), CurrencyCode::new);

    let amount = CurrencyConverter::convert_or_fallback(
        summary.grand_total_in_default_currency,
        &summary.currency,
        &from,
        rates,
    );
    if amount.is_approximate() {
        warn!(%from, trip_currency = %summary.currency, "quick convert skipped: no rate for source currency");
        return None;
    }

    CurrencyConverter::quick_convert(amount.amount, &from, &to, rates)
        .inspect_err(|err| warn!(%from, %to, error = %err, "quick convert skipped"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use tripsplit_core::ledger::{CreateExpenseInput, CreateTravelerInput, CreateTripInput};

    fn rates(now: DateTime<Utc>) -> ExchangeRateTable {
        ExchangeRateTable::new(
            CurrencyCode::new("USD"),
            BTreeMap::from([
                (CurrencyCode::new("EUR"), dec!(0.8)),
                (CurrencyCode::new("GBP"), dec!(0.75)),
            ]),
        )
        .unwrap()
        .with_fetched_at(now - Duration::hours(1))
    }

    fn ledger(travelers: &[&str]) -> ExpenseLedger {
        let mut ledger = ExpenseLedger::create(CreateTripInput {
            name: "Rome".into(),
            destination: "Italy".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            currency: CurrencyCode::new("EUR"),
        })
        .unwrap();
        for name in travelers {
            ledger
                .add_traveler(CreateTravelerInput {
                    name: (*name).into(),
                    email: None,
                })
                .unwrap();
        }
        ledger
    }

    fn pay(ledger: &mut ExpenseLedger, amount: rust_decimal::Decimal, payer: &str) {
        ledger
            .add_expense(CreateExpenseInput {
                description: "Gelato".into(),
                amount,
                currency: None,
                category: "snacks".into(),
                paid_by: payer.into(),
                timestamp: None,
            })
            .unwrap();
    }

    #[test]
    fn test_build_report() {
        let now = Utc::now();
        let mut ledger = ledger(&["Alice", "Bob"]);
        pay(&mut ledger, dec!(10), "Alice");

        let mut config = AppConfig::default();
        config.preference = PreferenceConfig {
            from_currency: Some("EUR".into()),
            to_currency: Some("GBP".into()),
        };

        let report = build_report(&config, &ledger, &rates(now), now);
        assert!(!report.rates_stale);
        assert_eq!(report.summary.grand_total_in_default_currency, dec!(10));
        assert_eq!(report.categories.len(), 1);

        let SplitOutcome::Ready(split) = &report.split else {
            panic!("split should be ready");
        };
        assert_eq!(split.fair_share, dec!(5));

        let quick = report.quick_convert.unwrap();
        assert_eq!(quick.converted_amount, dec!(9.38));
        assert_eq!(quick.rate, dec!(0.9375));

        let activity = report.activity.unwrap();
        assert_eq!(activity.traveler_count, 2);
        assert_eq!(activity.expense_count, 1);
    }

    #[test]
    fn test_build_report_without_travelers() {
        let now = Utc::now();
        let ledger = ledger(&[]);
        let report = build_report(&AppConfig::default(), &ledger, &rates(now), now);

        assert!(matches!(report.split, SplitOutcome::Unavailable { .. }));
        assert!(report.quick_convert.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["split"]["status"], "unavailable");
    }

    #[test]
    fn test_stale_rates_flagged() {
        let now = Utc::now();
        let ledger = ledger(&["Alice"]);
        let report = build_report(
            &AppConfig::default(),
            &ledger,
            &rates(now - Duration::hours(48)),
            now,
        );
        assert!(report.rates_stale);
    }

    #[test]
    fn test_quick_convert_defaults_source_to_trip_currency() {
        let now = Utc::now();
        let mut ledger = ledger(&["Alice"]);
        pay(&mut ledger, dec!(8), "Alice");
        let summary = AggregationEngine::compute_summary(&ledger, &rates(now));
        let preference = PreferenceConfig {
            from_currency: None,
            to_currency: Some("usd".into()),
        };

        let quick = quick_convert(&preference, &summary, &rates(now)).unwrap();
        assert_eq!(quick.from_currency, CurrencyCode::new("EUR"));
        assert_eq!(quick.converted_amount, dec!(10));
    }

    #[test]
    fn test_quick_convert_rounds_both_amounts() {
        let now = Utc::now();
        let mut ledger = ledger(&["Alice"]);
        pay(&mut ledger, dec!(10), "Alice");

        let mut config = AppConfig::default();
        config.preference = PreferenceConfig {
            from_currency: Some("GBP".into()),
            to_currency: Some("USD".into()),
        };

        // 10 EUR is 9.375 GBP
        let quick = build_report(&config, &ledger, &rates(now), now)
            .quick_convert
            .unwrap();
        assert_eq!(quick.amount, dec!(9.38));
        assert_eq!(quick.converted_amount, dec!(12.50));
        assert_eq!(quick.from_currency, CurrencyCode::new("GBP"));
    }

    #[test]
    fn test_quick_convert_unknown_pair_is_skipped() {
        let now = Utc::now();
        let ledger = ledger(&["Alice"]);
        let summary = AggregationEngine::compute_summary(&ledger, &rates(now));
        let preference = PreferenceConfig {
            from_currency: Some("EUR".into()),
            to_currency: Some("ZZZ".into()),
        };
        assert!(quick_convert(&preference, &summary, &rates(now)).is_none());
    }
}
