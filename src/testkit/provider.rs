//! Scripted [`OddsProvider`] for testing.
//!
//! [`StaticProvider`] serves a fixed event list and a per-event script. An
//! optional request budget is decremented on every call, the same way the
//! live client counts requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::id::EventId;
use crate::domain::market::{EventRef, EventSnapshot};
use crate::error::ProviderError;
use crate::port::OddsProvider;

/// What the provider returns for one event's odds.
#[derive(Debug, Clone)]
pub enum SnapshotScript {
    Snapshot(EventSnapshot),
    Status(u16),
    BudgetExhausted,
}

/// A provider with scripted responses.
#[derive(Default)]
pub struct StaticProvider {
    events: Vec<EventRef>,
    scripts: HashMap<EventId, SnapshotScript>,
    events_error: Option<u16>,
    budget: Option<AtomicU64>,
    event_calls: Arc<AtomicU32>,
    snapshot_calls: Arc<AtomicU32>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `snapshot` for its event.
    pub fn with_snapshot(mut self, snapshot: EventSnapshot) -> Self {
        let event = snapshot.event.clone();
        self.scripts
            .insert(event.id.clone(), SnapshotScript::Snapshot(snapshot));
        self.events.push(event);
        self
    }

    /// Fail `event`'s odds request with an HTTP status.
    pub fn with_failing_event(mut self, event: EventRef, status: u16) -> Self {
        self.scripts
            .insert(event.id.clone(), SnapshotScript::Status(status));
        self.events.push(event);
        self
    }

    /// Refuse `event`'s odds request as out of budget.
    pub fn with_exhausted_event(mut self, event: EventRef) -> Self {
        self.scripts
            .insert(event.id.clone(), SnapshotScript::BudgetExhausted);
        self.events.push(event);
        self
    }

    /// Fail the event listing with an HTTP status.
    pub fn with_events_error(mut self, status: u16) -> Self {
        self.events_error = Some(status);
        self
    }

    /// Allow `requests` calls before reporting an empty budget.
    pub fn with_budget(mut self, requests: u64) -> Self {
        self.budget = Some(AtomicU64::new(requests));
        self
    }

    /// Shared counters for (event listings, odds requests).
    pub fn counts(&self) -> (Arc<AtomicU32>, Arc<AtomicU32>) {
        (self.event_calls.clone(), self.snapshot_calls.clone())
    }

    pub fn event_calls(&self) -> u32 {
        self.event_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot_calls(&self) -> u32 {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    fn spend(&self) -> Result<(), ProviderError> {
        let Some(budget) = &self.budget else {
            return Ok(());
        };
        budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| ProviderError::BudgetExhausted)
    }
}

#[async_trait]
impl OddsProvider for StaticProvider {
    async fn fetch_upcoming_events(&self, _sport: &str) -> Result<Vec<EventRef>, ProviderError> {
        self.event_calls.fetch_add(1, Ordering::SeqCst);
        self.spend()?;
        if let Some(status) = self.events_error {
            return Err(ProviderError::Status {
                status,
                body: "scripted failure".into(),
            });
        }
        Ok(self.events.clone())
    }

    async fn fetch_market_snapshot(&self, event: &EventRef) -> Result<EventSnapshot, ProviderError> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        self.spend()?;
        match self.scripts.get(&event.id) {
            Some(SnapshotScript::Snapshot(snapshot)) => Ok(snapshot.clone()),
            Some(SnapshotScript::Status(status)) => Err(ProviderError::Status {
                status: *status,
                body: "scripted failure".into(),
            }),
            Some(SnapshotScript::BudgetExhausted) => Err(ProviderError::BudgetExhausted),
            None => Err(ProviderError::Status {
                status: 404,
                body: format!("unknown event {}", event.id),
            }),
        }
    }

    fn remaining_budget(&self) -> Option<u64> {
        self.budget.as_ref().map(|b| b.load(Ordering::SeqCst))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
