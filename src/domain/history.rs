//! Thread-safe memory of the last fair price seen per outcome.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

use super::id::EventId;
use super::market::{MarketSnapshot, Side};

/// Identifies one outcome within an event across scans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutcomeKey(String);

impl OutcomeKey {
    /// Key for `side` of `snapshot`: market, participant, line and side.
    #[must_use]
    pub fn new(snapshot: &MarketSnapshot, side: Side) -> Self {
        let participant = snapshot.participant.as_deref().unwrap_or("-");
        let line = snapshot
            .line_value
            .map_or_else(|| "-".to_string(), |line| format!("{line}"));
        Self(format!(
            "{}|{}|{}|{}",
            snapshot.market_key, participant, line, side
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percent change from `previous` to `current`.
///
/// Zero when there is no usable previous value.
#[must_use]
pub fn percent_change(previous: Option<f64>, current: f64) -> f64 {
    match previous {
        Some(prev) if prev.abs() > f64::EPSILON => (current - prev) / prev.abs() * 100.0,
        _ => 0.0,
    }
}

/// Last observed fair American price per (event, outcome).
///
/// Entries are created on first observation and overwritten on every
/// subsequent one. Nothing is evicted.
#[derive(Debug, Default)]
pub struct EventHistory {
    entries: RwLock<HashMap<EventId, HashMap<OutcomeKey, f64>>>,
}

impl EventHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Previously recorded fair price for an outcome.
    #[must_use]
    pub fn previous(&self, event_id: &EventId, outcome: &OutcomeKey) -> Option<f64> {
        self.entries
            .read()
            .get(event_id)
            .and_then(|outcomes| outcomes.get(outcome))
            .copied()
    }

    /// Store `fair_price` and return its percent change from the previous
    /// observation.
    pub fn record(&self, event_id: &EventId, outcome: OutcomeKey, fair_price: f64) -> f64 {
        let mut entries = self.entries.write();
        let previous = entries
            .entry(event_id.clone())
            .or_default()
            .insert(outcome, fair_price);
        percent_change(previous, fair_price)
    }

    /// Number of events with at least one recorded outcome.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of outcomes recorded for an event.
    #[must_use]
    pub fn outcome_count(&self, event_id: &EventId) -> usize {
        self.entries.read().get(event_id).map_or(0, HashMap::len)
    }
}
