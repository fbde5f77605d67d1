//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for secrets (`ODDS_API_KEY`, `DISCORD_WEBHOOK_URL`).
//!
//! # Example
//!
//! ```no_run
//! use sharpedge::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::pricing::{ConsensusConfig, EdgeConfig, SizingConfig};
use super::provider::{ProviderConfig, ODDS_API_KEY_ENV};
use super::service::{AlertsConfig, ScannerConfig, DISCORD_WEBHOOK_ENV};
use crate::application::{Pricing, ScannerSettings, Schedule};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; omitted values fall back to the defaults
/// documented on each field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Odds API connection and query settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Sharp book and consensus weighting.
    #[serde(default)]
    pub consensus: ConsensusConfig,

    /// Edge cap and acceptance band.
    #[serde(default)]
    pub edge: EdgeConfig,

    /// Kelly sizing and bankroll guardrails.
    #[serde(default)]
    pub sizing: SizingConfig,

    /// Alert throttling and sinks.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Scan loop timing.
    #[serde(default)]
    pub scanner: ScannerConfig,
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn fraction_in_unit_interval(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_nan() || value <= 0.0 || value >= 1.0 {
        return Err(invalid(field, "must be between 0 and 1 (exclusive)"));
    }
    Ok(())
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Secrets are read from the environment, never from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.provider.api_key = env_secret(ODDS_API_KEY_ENV);
        config.alerts.discord_webhook_url = env_secret(DISCORD_WEBHOOK_ENV);

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// The Odds API key, required to talk to the live provider.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when `ODDS_API_KEY` is unset.
    pub fn require_api_key(&self) -> Result<&str> {
        self.provider.api_key.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: ODDS_API_KEY_ENV,
            }
            .into()
        })
    }

    /// Scanner settings derived from the pricing, alert and scanner sections.
    #[must_use]
    pub fn scanner_settings(&self) -> ScannerSettings {
        ScannerSettings {
            sport: self.provider.sport.clone(),
            pricing: Pricing {
                sharp_book: self.consensus.sharp_book(),
                consensus: self.consensus.builder(),
                edge: self.edge.calculator(),
                band: self.edge.band(),
                sizer: self.sizing.sizer(),
            },
            max_alerts_per_event: self.alerts.max_per_event,
            alert_delay: self.alerts.delay(),
            fetch_concurrency: self.scanner.fetch_concurrency,
        }
    }

    /// Loop timing for the scan runtime.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        Schedule {
            interval: Duration::from_secs(self.scanner.interval_secs),
            budget_backoff: Duration::from_secs(self.scanner.budget_backoff_secs),
            error_backoff: Duration::from_secs(self.scanner.error_backoff_secs),
        }
    }

    /// Check that all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider;
        if provider.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        url::Url::parse(&provider.base_url).map_err(|e| invalid("base_url", &e.to_string()))?;
        if provider.sport.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "sport" }.into());
        }
        if provider.markets.is_empty() {
            return Err(invalid("markets", "at least one market is required").into());
        }
        if provider.calls_per_second == 0 {
            return Err(invalid("calls_per_second", "must be greater than 0").into());
        }
        if provider.timeout_ms == 0 {
            return Err(invalid("timeout_ms", "must be greater than 0").into());
        }

        let consensus = &self.consensus;
        if consensus.sharp_book.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "sharp_book" }.into());
        }
        if consensus.min_books < 2 {
            return Err(invalid("min_books", "must be at least 2").into());
        }
        fraction_in_unit_interval("max_prob_diff", consensus.max_prob_diff)?;
        if consensus.weights.iter().any(|(_, w)| w.is_nan() || w < 0.0) {
            return Err(invalid("weights", "weights must be 0 or greater").into());
        }

        let edge = &self.edge;
        if edge.min_edge.is_nan() || edge.min_edge < 0.0 {
            return Err(invalid("min_edge", "must be 0 or greater").into());
        }
        if edge.max_edge.is_nan() || edge.max_edge <= edge.min_edge {
            return Err(invalid("max_edge", "must be greater than min_edge").into());
        }
        if edge.max_edge_calc.is_nan() || edge.max_edge_calc <= 0.0 {
            return Err(invalid("max_edge_calc", "must be greater than 0").into());
        }

        let sizing = &self.sizing;
        if sizing.kelly_fraction.is_nan() || sizing.kelly_fraction <= 0.0 || sizing.kelly_fraction > 1.0
        {
            return Err(invalid("kelly_fraction", "must be in (0, 1]").into());
        }
        if sizing.bankroll <= Decimal::ZERO {
            return Err(invalid("bankroll", "must be greater than 0").into());
        }
        fraction_in_unit_interval("min_unit_pct", sizing.min_unit_pct)?;
        fraction_in_unit_interval("max_unit_pct", sizing.max_unit_pct)?;
        if sizing.max_unit_pct < sizing.min_unit_pct {
            return Err(invalid("max_unit_pct", "must be >= min_unit_pct").into());
        }

        if self.alerts.max_per_event == 0 {
            return Err(invalid("max_per_event", "must be greater than 0").into());
        }

        let scanner = &self.scanner;
        if scanner.interval_secs == 0 {
            return Err(invalid("interval_secs", "must be greater than 0").into());
        }
        if scanner.fetch_concurrency == 0 {
            return Err(invalid("fetch_concurrency", "must be greater than 0").into());
        }

        Ok(())
    }
}
