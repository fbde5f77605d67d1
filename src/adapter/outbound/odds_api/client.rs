//! The Odds API v4 HTTP client.
//!
//! Every request waits on a `governor` rate limiter and is counted against
//! the monthly request budget. The provider reports the authoritative
//! remaining count in the `x-requests-remaining` header, which replaces the
//! local estimate whenever it is present.
//!
//! Once the budget reaches zero no request is sent until the refresh window
//! has passed. The budget is then restored to the monthly allowance (at least
//! one request) and the next response header corrects the count.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::convert::event_snapshot;
use super::dto::{ApiErrorDto, EventDto, EventOddsDto};
use crate::domain::market::{EventRef, EventSnapshot};
use crate::error::ProviderError;
use crate::infrastructure::config::provider::ProviderConfig;
use crate::port::OddsProvider;

const REMAINING_HEADER: &str = "x-requests-remaining";
const USED_HEADER: &str = "x-requests-used";
const OUT_OF_CREDITS: &str = "OUT_OF_USAGE_CREDITS";
const DEFAULT_BUDGET_REFRESH: Duration = Duration::from_secs(3600);

/// HTTP client for The Odds API.
pub struct OddsApiClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    regions: String,
    markets: String,
    bookmakers: String,
    include_links: bool,
    include_bet_limits: bool,
    limiter: Arc<DefaultDirectRateLimiter>,
    remaining: AtomicU64,
    monthly_budget: u64,
    budget_refresh: Duration,
    exhausted_since: Mutex<Option<Instant>>,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl OddsApiClient {
    /// Build a client from configuration and an API key.
    #[must_use]
    pub fn from_config(config: &ProviderConfig, api_key: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        let per_second = NonZeroU32::new(config.calls_per_second).unwrap_or(NonZeroU32::MIN);

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            regions: config.regions.join(","),
            markets: config.markets.join(","),
            bookmakers: config.bookmakers.join(","),
            include_links: config.include_links,
            include_bet_limits: config.include_bet_limits,
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(per_second))),
            remaining: AtomicU64::new(config.monthly_budget),
            monthly_budget: config.monthly_budget,
            budget_refresh: DEFAULT_BUDGET_REFRESH,
            exhausted_since: Mutex::new(None),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// Wait this long after the budget runs out before sending again.
    #[must_use]
    pub fn with_budget_refresh(mut self, refresh: Duration) -> Self {
        self.budget_refresh = refresh;
        self
    }

    /// Requests left, restoring the allowance once the refresh window passed.
    fn available_budget(&self) -> u64 {
        let remaining = self.remaining.load(Ordering::Relaxed);
        if remaining > 0 {
            return remaining;
        }

        let mut since = self.exhausted_since.lock();
        let started = *since.get_or_insert_with(Instant::now);
        if started.elapsed() < self.budget_refresh {
            return 0;
        }

        *since = None;
        let restored = self.monthly_budget.max(1);
        self.remaining.store(restored, Ordering::Relaxed);
        info!(
            restored,
            refresh_secs = self.budget_refresh.as_secs(),
            "Request budget refresh window passed, resuming requests"
        );
        restored
    }

    fn mark_exhausted(&self) {
        self.remaining.store(0, Ordering::Relaxed);
        *self.exhausted_since.lock() = Some(Instant::now());
    }

    async fn get_with_retry<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            if self.available_budget() == 0 {
                return Err(ProviderError::BudgetExhausted);
            }
            self.limiter.until_ready().await;

            let response = self
                .http
                .get(url)
                .query(&[("apiKey", self.api_key.as_str())])
                .query(query)
                .send()
                .await;
            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            self.track_budget(response.headers());

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(self.status_error(status, body));
            }

            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()));
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    fn track_budget(&self, headers: &HeaderMap) {
        let reported = headers
            .get(REMAINING_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<f64>().ok());

        match reported {
            Some(remaining) => {
                let remaining = remaining.max(0.0) as u64;
                if remaining == 0 {
                    self.mark_exhausted();
                } else {
                    self.remaining.store(remaining, Ordering::Relaxed);
                }
                debug!(
                    remaining,
                    used = headers
                        .get(USED_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("?"),
                    "Request budget"
                );
            }
            None => {
                let previous = self
                    .remaining
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
                if previous == Ok(1) {
                    self.mark_exhausted();
                }
            }
        }
    }

    fn status_error(&self, status: StatusCode, body: String) -> ProviderError {
        let api_error = serde_json::from_str::<ApiErrorDto>(&body).ok();
        let out_of_credits = api_error
            .as_ref()
            .and_then(|e| e.error_code.as_deref())
            .is_some_and(|code| code == OUT_OF_CREDITS);

        if out_of_credits
            || (status == StatusCode::TOO_MANY_REQUESTS
                && self.remaining.load(Ordering::Relaxed) == 0)
        {
            self.mark_exhausted();
            return ProviderError::BudgetExhausted;
        }

        let body = api_error.and_then(|e| e.message).unwrap_or(body);
        ProviderError::Status {
            status: status.as_u16(),
            body,
        }
    }

    fn flag(value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }
}

#[async_trait]
impl OddsProvider for OddsApiClient {
    async fn fetch_upcoming_events(&self, sport: &str) -> Result<Vec<EventRef>, ProviderError> {
        let url = format!("{}/v4/sports/{}/events", self.base_url, sport);
        let events: Vec<EventDto> = self.get_with_retry(&url, &[]).await?;
        info!(sport, count = events.len(), "Fetched upcoming events");
        Ok(events.into_iter().map(EventRef::from).collect())
    }

    async fn fetch_market_snapshot(&self, event: &EventRef) -> Result<EventSnapshot, ProviderError> {
        let url = format!(
            "{}/v4/sports/{}/events/{}/odds",
            self.base_url, event.sport_key, event.id
        );
        let query = [
            ("regions", self.regions.as_str()),
            ("markets", self.markets.as_str()),
            ("bookmakers", self.bookmakers.as_str()),
            ("oddsFormat", "american"),
            ("includeLinks", Self::flag(self.include_links)),
            ("includeBetLimits", Self::flag(self.include_bet_limits)),
        ];
        let odds: EventOddsDto = self.get_with_retry(&url, &query).await?;
        let books = odds.bookmakers.len();
        let snapshot = event_snapshot(odds);
        debug!(
            event_id = %event.id,
            books,
            markets = snapshot.markets.len(),
            "Fetched event odds"
        );
        Ok(snapshot)
    }

    fn remaining_budget(&self) -> Option<u64> {
        Some(self.available_budget())
    }

    fn name(&self) -> &'static str {
        "the-odds-api"
    }
}
