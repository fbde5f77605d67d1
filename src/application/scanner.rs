//! Opportunity scanner.
//!
//! One [`Scanner::run_scan_cycle`] call fetches upcoming events, pulls their
//! market snapshots with bounded concurrency, prices every outcome and
//! delivers accepted opportunities to the alert sink. A cycle never fails as
//! a whole: provider, pricing and delivery errors are logged, counted in the
//! returned [`ScanReport`] and skipped.

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::outcome::Pricing;
use crate::domain::history::EventHistory;
use crate::domain::market::{EventRef, EventSnapshot};
use crate::domain::opportunity::Opportunity;
use crate::domain::stats::{ScanReport, ScanStats};
use crate::error::ProviderError;
use crate::port::{AlertSender, OddsProvider};

/// Scanner settings.
#[derive(Debug, Clone)]
pub struct ScannerSettings {
    /// Sport key passed to the provider.
    pub sport: String,
    pub pricing: Pricing,
    /// Alerts delivered per event per cycle; the rest are suppressed.
    pub max_alerts_per_event: usize,
    /// Pause after each delivered alert.
    pub alert_delay: Duration,
    /// Snapshot requests in flight at once.
    pub fetch_concurrency: usize,
}

/// Scans upcoming events for +EV opportunities.
pub struct Scanner {
    provider: Arc<dyn OddsProvider>,
    alerts: Arc<dyn AlertSender>,
    history: Arc<EventHistory>,
    settings: ScannerSettings,
    shutdown: Option<watch::Receiver<bool>>,
}

impl Scanner {
    pub fn new(
        provider: Arc<dyn OddsProvider>,
        alerts: Arc<dyn AlertSender>,
        history: Arc<EventHistory>,
        settings: ScannerSettings,
    ) -> Self {
        Self {
            provider,
            alerts,
            history,
            settings,
            shutdown: None,
        }
    }

    /// Stop after the current event once `shutdown` flips to `true`.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &ScannerSettings {
        &self.settings
    }

    #[must_use]
    pub fn history(&self) -> &Arc<EventHistory> {
        &self.history
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }

    fn budget_spent(&self) -> bool {
        self.provider.remaining_budget() == Some(0)
    }

    /// Run one full scan over the upcoming events.
    pub async fn run_scan_cycle(&self) -> ScanReport {
        let mut stats = ScanStats::new();
        let mut opportunities = Vec::new();

        if self.budget_spent() {
            warn!(provider = self.provider.name(), "Request budget exhausted, skipping scan");
            stats.budget_exhausted = true;
            return ScanReport {
                stats,
                opportunities,
            };
        }

        let events = match self
            .provider
            .fetch_upcoming_events(&self.settings.sport)
            .await
        {
            Ok(events) => events,
            Err(e) => {
                error!(sport = %self.settings.sport, error = %e, "Failed to fetch events");
                stats.errors += 1;
                stats.budget_exhausted = e.is_budget_exhausted();
                return ScanReport {
                    stats,
                    opportunities,
                };
            }
        };
        info!(sport = %self.settings.sport, count = events.len(), "Found upcoming events");

        let total = events.len();
        let mut snapshots = pin!(stream::iter(&events)
            .map(|event| self.fetch_event(event))
            .buffered(self.settings.fetch_concurrency.max(1)));

        let mut index = 0;
        while let Some((event, result)) = snapshots.next().await {
            index += 1;
            let remaining = (total - index + 1) as u64;

            if self.is_shutting_down() {
                info!(skipped = remaining, "Shutdown requested, stopping scan");
                stats.events_skipped += remaining;
                break;
            }

            match result {
                Ok(snapshot) => {
                    let (event_stats, mut found) = self.process_event(&snapshot).await;
                    stats.merge(&event_stats);
                    opportunities.append(&mut found);
                }
                Err(e) if e.is_budget_exhausted() => {
                    warn!(event_id = %event.id, skipped = remaining, "Request budget exhausted");
                    stats.budget_exhausted = true;
                    stats.events_skipped += remaining;
                    break;
                }
                Err(e) => {
                    warn!(event_id = %event.id, error = %e, "Failed to fetch event odds");
                    stats.events_failed += 1;
                    stats.errors += 1;
                }
            }
        }

        info!(
            events = stats.events_seen,
            failed = stats.events_failed,
            skipped = stats.events_skipped,
            outcomes = stats.outcomes_seen,
            accepted = stats.opportunities_accepted,
            alerts_sent = stats.alerts_sent,
            remaining_budget = ?self.provider.remaining_budget(),
            "Scan cycle complete"
        );

        ScanReport {
            stats,
            opportunities,
        }
    }

    async fn fetch_event<'a>(
        &self,
        event: &'a EventRef,
    ) -> (&'a EventRef, Result<EventSnapshot, ProviderError>) {
        if self.budget_spent() {
            return (event, Err(ProviderError::BudgetExhausted));
        }
        (event, self.provider.fetch_market_snapshot(event).await)
    }

    /// Price every outcome of one event and deliver what passes.
    async fn process_event(&self, snapshot: &EventSnapshot) -> (ScanStats, Vec<Opportunity>) {
        let event = &snapshot.event;
        let mut stats = ScanStats {
            events_seen: 1,
            ..ScanStats::default()
        };
        let mut accepted = Vec::new();

        for market in &snapshot.markets {
            stats.markets_seen += 1;
            let Some(sides) = market.sides() else {
                continue;
            };
            for side in sides {
                stats.outcomes_seen += 1;
                accepted.extend(self.settings.pricing.evaluate(
                    event,
                    market,
                    side,
                    &self.history,
                    &mut stats,
                ));
            }
        }

        let mut emitted = 0usize;
        for opportunity in &accepted {
            if emitted >= self.settings.max_alerts_per_event {
                debug!(
                    event_id = %event.id,
                    outcome = %opportunity.describe(),
                    "Alert cap reached, suppressing"
                );
                stats.alerts_suppressed += 1;
                continue;
            }
            emitted += 1;

            match self.alerts.send_alert(opportunity).await {
                Ok(()) => {
                    stats.alerts_sent += 1;
                    info!(
                        event_id = %event.id,
                        book = %opportunity.book,
                        outcome = %opportunity.describe(),
                        edge_pct = opportunity.edge * 100.0,
                        units = opportunity.recommended_units,
                        "Sent +EV alert"
                    );
                }
                Err(e) => {
                    warn!(event_id = %event.id, error = %e, "Failed to send alert");
                    stats.alerts_failed += 1;
                    stats.errors += 1;
                }
            }

            if !self.settings.alert_delay.is_zero() {
                tokio::time::sleep(self.settings.alert_delay).await;
            }
        }

        log_event_summary(event, &stats);
        (stats, accepted)
    }
}

fn log_event_summary(event: &EventRef, stats: &ScanStats) {
    info!(
        event_id = %event.id,
        matchup = %event.matchup(),
        markets = stats.markets_seen,
        outcomes = stats.outcomes_seen,
        from_sharp = stats.fair_from_sharp,
        from_consensus = stats.fair_from_consensus,
        insufficient_books = stats.insufficient_books,
        no_opposing_quote = stats.no_opposing_quote,
        disagreement = stats.disagreement,
        edges_calculated = stats.quotes_compared,
        positive_edges = stats.positive_edges,
        accepted = stats.opportunities_accepted,
        alerts_sent = stats.alerts_sent,
        alerts_suppressed = stats.alerts_suppressed,
        processing_rate_pct = stats.processing_rate(),
        edge_rate_pct = stats.edge_rate(),
        alert_rate_pct = stats.alert_rate(),
        "Event summary"
    );
}
