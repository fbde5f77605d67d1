//! The Odds API v4 response types.
//!
//! Unknown fields are ignored; fields the scanner depends on are required.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Entry of `GET /v4/sports/{sport}/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub sport_key: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
}

/// Body of `GET /v4/sports/{sport}/events/{id}/odds`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventOddsDto {
    pub id: String,
    pub sport_key: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookmakerDto {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub markets: Vec<MarketDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDto {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeDto {
    /// `Over`/`Under`, or a team name for game markets.
    pub name: String,
    /// Player name for props.
    #[serde(default)]
    pub description: Option<String>,
    /// American price when requested with `oddsFormat=american`.
    pub price: f64,
    #[serde(default)]
    pub point: Option<f64>,
    #[serde(default)]
    pub bet_limit: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    /// Region-keyed deep links (`us`, `us2`, ...).
    #[serde(default)]
    pub links: Option<HashMap<String, String>>,
}

impl OutcomeDto {
    /// Deep link, preferring the plain `link` over the US regional one.
    #[must_use]
    pub fn deep_link(&self) -> Option<String> {
        self.link
            .clone()
            .or_else(|| self.links.as_ref().and_then(|links| links.get("us").cloned()))
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}
