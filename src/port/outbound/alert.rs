//! Alert port for accepted opportunities.

use async_trait::async_trait;

use crate::domain::opportunity::Opportunity;
use crate::error::DeliveryError;

/// Delivers one opportunity to an external sink.
///
/// Implementations must be thread-safe (`Send + Sync`). A failed delivery is
/// reported to the caller, which logs and counts it; it never aborts a scan.
#[async_trait]
pub trait AlertSender: Send + Sync {
    /// Deliver an alert.
    async fn send_alert(&self, opportunity: &Opportunity) -> Result<(), DeliveryError>;

    /// Sink name for logging.
    fn name(&self) -> &'static str;
}

/// Registry of alert senders (composite pattern).
///
/// Delivers to every registered sender, even after one fails, and reports
/// the first failure.
pub struct AlertRegistry {
    senders: Vec<Box<dyn AlertSender>>,
}

impl AlertRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { senders: vec![] }
    }

    /// Register a sender.
    pub fn register(&mut self, sender: Box<dyn AlertSender>) {
        self.senders.push(sender);
    }

    /// Number of registered senders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl Default for AlertRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSender for AlertRegistry {
    async fn send_alert(&self, opportunity: &Opportunity) -> Result<(), DeliveryError> {
        let mut first_error = None;
        for sender in &self.senders {
            if let Err(e) = sender.send_alert(opportunity).await {
                tracing::warn!(sender = sender.name(), error = %e, "Alert delivery failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn name(&self) -> &'static str {
        "registry"
    }
}

/// A no-op sender for testing or when alerts are disabled.
pub struct NullAlertSender;

#[async_trait]
impl AlertSender for NullAlertSender {
    async fn send_alert(&self, _opportunity: &Opportunity) -> Result<(), DeliveryError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
