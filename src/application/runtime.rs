//! Repeating scan loop.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use super::scanner::Scanner;
use crate::domain::stats::{ScanReport, ScanStats};

/// Pauses between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Normal pause between cycles.
    pub interval: Duration,
    /// Pause once the provider's request budget is spent.
    pub budget_backoff: Duration,
    /// Pause after a cycle that could not list events.
    pub error_backoff: Duration,
}

impl Schedule {
    /// Pause to apply after `report`.
    #[must_use]
    pub fn pause_after(&self, report: &ScanReport) -> Duration {
        let stats = &report.stats;
        if stats.budget_exhausted {
            self.budget_backoff
        } else if stats.events_seen == 0 && stats.errors > 0 {
            self.error_backoff
        } else {
            self.interval
        }
    }
}

/// Totals across all cycles run by [`ScanRuntime::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSummary {
    pub cycles: u64,
    pub totals: ScanStats,
}

/// Runs scan cycles until shutdown.
pub struct ScanRuntime {
    scanner: Scanner,
    schedule: Schedule,
}

impl ScanRuntime {
    #[must_use]
    pub fn new(scanner: Scanner, schedule: Schedule) -> Self {
        Self { scanner, schedule }
    }

    /// Loop until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The signal is honored between cycles and while sleeping. Inside a
    /// cycle the scanner checks it between events if it was built
    /// [`Scanner::with_shutdown`].
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> RuntimeSummary {
        let mut summary = RuntimeSummary::default();

        loop {
            if *shutdown.borrow() {
                break;
            }

            let report = self.scanner.run_scan_cycle().await;
            summary.cycles += 1;
            summary.totals.merge(&report.stats);

            let pause = self.schedule.pause_after(&report);
            if report.stats.budget_exhausted {
                warn!(
                    pause_secs = pause.as_secs(),
                    "Request budget exhausted, backing off"
                );
            } else {
                info!(
                    cycle = summary.cycles,
                    opportunities = report.opportunities.len(),
                    pause_secs = pause.as_secs(),
                    "Waiting before next scan"
                );
            }

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(
            cycles = summary.cycles,
            alerts_sent = summary.totals.alerts_sent,
            errors = summary.totals.errors,
            "Scan loop stopped"
        );
        summary
    }
}
