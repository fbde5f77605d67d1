//! Odds provider port.

use async_trait::async_trait;

use crate::domain::market::{EventRef, EventSnapshot};
use crate::error::ProviderError;

/// Source of upcoming events and their market snapshots.
///
/// Implementations decode and validate the upstream payload; the scanner
/// only ever sees well-formed snapshots.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Upcoming events for a sport key (e.g. `basketball_nba`).
    async fn fetch_upcoming_events(&self, sport: &str) -> Result<Vec<EventRef>, ProviderError>;

    /// Every configured market for one event, grouped into two-way
    /// snapshots.
    async fn fetch_market_snapshot(&self, event: &EventRef) -> Result<EventSnapshot, ProviderError>;

    /// Remaining request budget, if the provider meters calls.
    fn remaining_budget(&self) -> Option<u64> {
        None
    }

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
