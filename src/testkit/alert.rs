//! Mock alert senders.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::opportunity::Opportunity;
use crate::error::DeliveryError;
use crate::port::AlertSender;

/// Records every delivered opportunity.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the scanner.
#[derive(Clone, Default)]
pub struct RecordingAlertSender {
    sent: Arc<Mutex<Vec<Opportunity>>>,
}

impl RecordingAlertSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opportunities delivered so far, in order.
    pub fn sent(&self) -> Vec<Opportunity> {
        self.sent.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl AlertSender for RecordingAlertSender {
    async fn send_alert(&self, opportunity: &Opportunity) -> Result<(), DeliveryError> {
        self.sent.lock().push(opportunity.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Rejects every alert and counts the attempts.
#[derive(Clone, Default)]
pub struct FailingAlertSender {
    attempts: Arc<AtomicU32>,
}

impl FailingAlertSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertSender for FailingAlertSender {
    async fn send_alert(&self, _opportunity: &Opportunity) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DeliveryError::Rejected("scripted failure".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
