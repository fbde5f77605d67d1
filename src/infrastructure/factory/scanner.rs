//! Scanner factory.

use std::sync::Arc;

use super::alert::build_alert_registry;
use crate::adapter::outbound::odds_api::OddsApiClient;
use crate::application::Scanner;
use crate::domain::history::EventHistory;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::OddsProvider;

/// Build The Odds API provider.
///
/// The client waits out the scan loop's budget backoff before it sends again
/// after the request budget runs out.
///
/// # Errors
///
/// Returns an error if `ODDS_API_KEY` is not set.
pub fn build_provider(config: &Config) -> Result<Arc<dyn OddsProvider>> {
    let api_key = config.require_api_key()?;
    let client = OddsApiClient::from_config(&config.provider, api_key)
        .with_budget_refresh(config.schedule().budget_backoff);
    Ok(Arc::new(client))
}

/// Build a scanner with a fresh fair value history.
///
/// # Errors
///
/// Returns an error if the provider cannot be built.
pub fn build_scanner(config: &Config) -> Result<Scanner> {
    let provider = build_provider(config)?;
    let alerts = Arc::new(build_alert_registry(config));
    Ok(Scanner::new(
        provider,
        alerts,
        Arc::new(EventHistory::new()),
        config.scanner_settings(),
    ))
}
