//! Scan statistics.
//!
//! Counters collected per event and merged into a per-cycle total.

use serde::Serialize;

use super::consensus::Unavailable;
use super::opportunity::Opportunity;

/// Counters for one event or one whole cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub events_seen: u64,
    pub events_failed: u64,
    /// Events not fetched because of shutdown or an exhausted budget.
    pub events_skipped: u64,
    pub markets_seen: u64,
    pub outcomes_seen: u64,
    pub fair_from_sharp: u64,
    pub fair_from_consensus: u64,
    pub outcomes_unavailable: u64,
    pub insufficient_books: u64,
    pub no_opposing_quote: u64,
    pub disagreement: u64,
    pub quotes_compared: u64,
    pub positive_edges: u64,
    pub opportunities_accepted: u64,
    pub alerts_sent: u64,
    pub alerts_failed: u64,
    pub alerts_suppressed: u64,
    pub errors: u64,
    pub budget_exhausted: bool,
}

impl ScanStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an outcome with no fair line, by reason.
    pub fn record_unavailable(&mut self, reason: Unavailable) {
        self.outcomes_unavailable += 1;
        match reason {
            Unavailable::InsufficientBooks { .. } => self.insufficient_books += 1,
            Unavailable::NoOpposingQuote => self.no_opposing_quote += 1,
            Unavailable::Disagreement => self.disagreement += 1,
        }
    }

    /// Outcomes that had a fair line.
    #[must_use]
    pub const fn outcomes_processed(&self) -> u64 {
        self.fair_from_sharp + self.fair_from_consensus
    }

    /// Percent of seen outcomes that got a fair line.
    #[must_use]
    pub fn processing_rate(&self) -> f64 {
        rate(self.outcomes_processed(), self.outcomes_seen)
    }

    /// Percent of compared quotes with a positive edge.
    #[must_use]
    pub fn edge_rate(&self) -> f64 {
        rate(self.positive_edges, self.quotes_compared)
    }

    /// Percent of positive edges that turned into sent alerts.
    #[must_use]
    pub fn alert_rate(&self) -> f64 {
        rate(self.alerts_sent, self.positive_edges)
    }

    /// Add another set of counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.events_seen += other.events_seen;
        self.events_failed += other.events_failed;
        self.events_skipped += other.events_skipped;
        self.markets_seen += other.markets_seen;
        self.outcomes_seen += other.outcomes_seen;
        self.fair_from_sharp += other.fair_from_sharp;
        self.fair_from_consensus += other.fair_from_consensus;
        self.outcomes_unavailable += other.outcomes_unavailable;
        self.insufficient_books += other.insufficient_books;
        self.no_opposing_quote += other.no_opposing_quote;
        self.disagreement += other.disagreement;
        self.quotes_compared += other.quotes_compared;
        self.positive_edges += other.positive_edges;
        self.opportunities_accepted += other.opportunities_accepted;
        self.alerts_sent += other.alerts_sent;
        self.alerts_failed += other.alerts_failed;
        self.alerts_suppressed += other.alerts_suppressed;
        self.errors += other.errors;
        self.budget_exhausted |= other.budget_exhausted;
    }
}

fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Result of one scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    pub stats: ScanStats,
    /// Accepted opportunities in discovery order, including suppressed ones.
    pub opportunities: Vec<Opportunity>,
}
