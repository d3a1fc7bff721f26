//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement and display precision.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Exchange rate snapshot policy.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Where the host reads its snapshots from.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Persisted quick-convert preference.
    #[serde(default)]
    pub preference: PreferenceConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Tolerance under which a balance counts as settled.
    #[serde(default = "default_epsilon")]
    pub epsilon: Decimal,
    /// Decimal places for amounts at the presentation boundary.
    #[serde(default = "default_amount_decimals")]
    pub amount_decimals: u32,
    /// Decimal places for percentages at the presentation boundary.
    #[serde(default = "default_percentage_decimals")]
    pub percentage_decimals: u32,
}

fn default_epsilon() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_amount_decimals() -> u32 {
    2
}

fn default_percentage_decimals() -> u32 {
    1
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            amount_decimals: default_amount_decimals(),
            percentage_decimals: default_percentage_decimals(),
        }
    }
}

/// Exchange rate snapshot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Age after which a snapshot should be refreshed.
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u32,
}

fn default_max_age_hours() -> u32 {
    24
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            max_age_hours: default_max_age_hours(),
        }
    }
}

/// Snapshot source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path of the ledger snapshot (JSON).
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
    /// Path of the exchange rate snapshot (JSON).
    #[serde(default = "default_rates_path")]
    pub rates_path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/ledger.json")
}

fn default_rates_path() -> PathBuf {
    PathBuf::from("data/rates.json")
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
            rates_path: default_rates_path(),
        }
    }
}

/// Quick-convert preference, re-applied to computed totals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceConfig {
    /// Currency to convert from. Defaults to the trip currency.
    pub from_currency: Option<String>,
    /// Currency to convert to. No annotation when unset.
    pub to_currency: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "tripsplit=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TRIPSPLIT__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TRIPSPLIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "TRIPSPLIT__SETTLEMENT__AMOUNT_DECIMALS",
                "TRIPSPLIT__LOGGING__JSON",
                "TRIPSPLIT__RATES__MAX_AGE_HOURS",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.epsilon, dec!(0.01));
                assert_eq!(config.settlement.amount_decimals, 2);
                assert_eq!(config.settlement.percentage_decimals, 1);
                assert_eq!(config.rates.max_age_hours, 24);
                assert_eq!(config.logging.filter, "tripsplit=info");
                assert!(!config.logging.json);
                assert!(config.preference.to_currency.is_none());
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("TRIPSPLIT__RATES__MAX_AGE_HOURS", Some("6")),
                ("TRIPSPLIT__LOGGING__JSON", Some("true")),
                ("TRIPSPLIT__PREFERENCE__TO_CURRENCY", Some("EUR")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.rates.max_age_hours, 6);
                assert!(config.logging.json);
                assert_eq!(config.preference.to_currency.as_deref(), Some("EUR"));
            },
        );
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"settlement": {"epsilon": "0.05"}}"#).unwrap();
        assert_eq!(config.settlement.epsilon, dec!(0.05));
        assert_eq!(config.settlement.amount_decimals, 2);
        assert_eq!(config.snapshot.ledger_path, PathBuf::from("data/ledger.json"));
    }
}
