//! Odds provider configuration.

use serde::Deserialize;

/// Environment variable holding the Odds API key.
pub const ODDS_API_KEY_ENV: &str = "ODDS_API_KEY";

/// The Odds API connection and query settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API root, without the `/v4` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sport key to scan.
    #[serde(default = "default_sport")]
    pub sport: String,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    #[serde(default = "default_markets")]
    pub markets: Vec<String>,
    #[serde(default = "default_bookmakers")]
    pub bookmakers: Vec<String>,
    /// Requests per second allowed by the plan (default: 1).
    #[serde(default = "default_calls_per_second")]
    pub calls_per_second: u32,
    /// Requests per month allowed by the plan (default: 500).
    #[serde(default = "default_monthly_budget")]
    pub monthly_budget: u64,
    /// HTTP timeout in milliseconds (default: 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Attempts per request on timeouts and connection errors (default: 3).
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Pause between attempts in milliseconds (default: 500).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Ask for bet-slip deep links.
    #[serde(default = "default_true")]
    pub include_links: bool,
    /// Ask for bet limits.
    #[serde(default = "default_true")]
    pub include_bet_limits: bool,
    /// Loaded from `ODDS_API_KEY`, never from the file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    "https://api.the-odds-api.com".into()
}

fn default_sport() -> String {
    "basketball_nba".into()
}

fn default_regions() -> Vec<String> {
    ["us", "us2", "us_dfs", "eu", "us_ex"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_markets() -> Vec<String> {
    [
        "player_points",
        "player_rebounds",
        "player_assists",
        "player_threes",
        "player_blocks",
        "player_steals",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_bookmakers() -> Vec<String> {
    [
        "pinnacle",
        "betonlineag",
        "fanduel",
        "draftkings",
        "fliff",
        "underdog",
        "betmgm",
        "betrivers",
        "ballybet",
        "espnbet",
        "novig",
        "prophetx",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

const fn default_calls_per_second() -> u32 {
    1
}

const fn default_monthly_budget() -> u64 {
    500
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

const fn default_true() -> bool {
    true
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sport: default_sport(),
            regions: default_regions(),
            markets: default_markets(),
            bookmakers: default_bookmakers(),
            calls_per_second: default_calls_per_second(),
            monthly_budget: default_monthly_budget(),
            timeout_ms: default_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            include_links: default_true(),
            include_bet_limits: default_true(),
            api_key: None,
        }
    }
}
