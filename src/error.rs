use thiserror::Error;

use crate::domain::error::OddsError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures talking to the odds provider.
///
/// All variants are transient from the scanner's point of view: the event
/// (or the whole cycle) is skipped and retried on the next schedule.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("request budget exhausted")]
    BudgetExhausted,
}

impl ProviderError {
    /// True when the provider refused the call because the quota is spent.
    #[must_use]
    pub const fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::BudgetExhausted)
    }
}

/// Failures delivering an alert downstream.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("alert channel returned status {status}")]
    Status { status: u16 },

    #[error("alert rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Odds(#[from] OddsError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
