//! Alert sender that writes opportunities to the log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::opportunity::Opportunity;
use crate::error::DeliveryError;
use crate::port::AlertSender;

/// Emits one structured `info` line per opportunity.
pub struct LogAlertSender;

#[async_trait]
impl AlertSender for LogAlertSender {
    async fn send_alert(&self, opportunity: &Opportunity) -> Result<(), DeliveryError> {
        info!(
            event_id = %opportunity.event_id,
            matchup = %opportunity.matchup,
            book = %opportunity.book,
            market = %opportunity.market_key,
            outcome = %opportunity.describe(),
            offered = %opportunity.offered_price,
            fair = %opportunity.fair_price,
            edge_pct = opportunity.edge * 100.0,
            ev_pct = opportunity.ev_pct,
            units = opportunity.recommended_units,
            dollars = %opportunity.recommended_dollars,
            fair_delta_pct = opportunity.fair_value_delta,
            source = %opportunity.fair_source,
            "+EV opportunity"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
