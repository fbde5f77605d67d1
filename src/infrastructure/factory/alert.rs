//! Alert registry factory.

use tracing::info;
#[cfg(not(feature = "discord"))]
use tracing::warn;

use crate::adapter::outbound::alert::LogAlertSender;
#[cfg(feature = "discord")]
use crate::adapter::outbound::alert::DiscordWebhookSender;
use crate::infrastructure::config::settings::Config;
use crate::port::AlertRegistry;

/// Build the alert registry from configuration.
///
/// Includes the log sender when `alerts.log` is set, and the Discord sender
/// when `DISCORD_WEBHOOK_URL` is present and the `discord` feature is enabled.
#[must_use]
pub fn build_alert_registry(config: &Config) -> AlertRegistry {
    let mut registry = AlertRegistry::new();
    if config.alerts.log {
        registry.register(Box::new(LogAlertSender));
    }

    if let Some(url) = &config.alerts.discord_webhook_url {
        #[cfg(feature = "discord")]
        {
            registry.register(Box::new(
                DiscordWebhookSender::new(url.clone()).with_username(env!("CARGO_PKG_NAME")),
            ));
            info!("Discord alerts enabled");
        }
        #[cfg(not(feature = "discord"))]
        {
            let _ = url;
            warn!("DISCORD_WEBHOOK_URL set but the discord feature is disabled");
        }
    }

    info!(senders = registry.len(), "Alert registry built");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sender_only_by_default() {
        let registry = build_alert_registry(&Config::default());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_log_sender_can_be_disabled() {
        let mut config = Config::default();
        config.alerts.log = false;
        assert!(build_alert_registry(&config).is_empty());
    }

    #[cfg(feature = "discord")]
    #[test]
    fn test_discord_sender_added_with_webhook() {
        let mut config = Config::default();
        config.alerts.discord_webhook_url = Some("https://discord.test/api/webhooks/1".into());
        assert_eq!(build_alert_registry(&config).len(), 2);
    }
}
