//! Alerting and scan loop configuration.

use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding the Discord webhook URL.
pub const DISCORD_WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";

const fn default_true() -> bool {
    true
}

/// Alert delivery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    /// Alerts sent per event per scan before the rest are suppressed (default: 10).
    #[serde(default = "default_max_per_event")]
    pub max_per_event: usize,
    /// Pause after each sent alert in milliseconds (default: 3000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Log every opportunity through tracing.
    #[serde(default = "default_true")]
    pub log: bool,
    /// Loaded from `DISCORD_WEBHOOK_URL`, never from the file.
    #[serde(skip)]
    pub discord_webhook_url: Option<String>,
}

const fn default_max_per_event() -> usize {
    10
}

const fn default_delay_ms() -> u64 {
    3000
}

impl AlertsConfig {
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            max_per_event: default_max_per_event(),
            delay_ms: default_delay_ms(),
            log: default_true(),
            discord_webhook_url: None,
        }
    }
}

/// Scan loop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Pause between cycles in seconds (default: 60).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Snapshot requests in flight at once (default: 1).
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    /// Pause after the request budget runs out in seconds (default: 3600).
    #[serde(default = "default_budget_backoff_secs")]
    pub budget_backoff_secs: u64,
    /// Pause after a failed cycle in seconds (default: 60).
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_fetch_concurrency() -> usize {
    1
}

const fn default_budget_backoff_secs() -> u64 {
    3600
}

const fn default_error_backoff_secs() -> u64 {
    60
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fetch_concurrency: default_fetch_concurrency(),
            budget_backoff_secs: default_budget_backoff_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}
