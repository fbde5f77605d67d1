//! Alert adapters.
//!
//! Implements the `port::AlertSender` trait for each delivery channel.

#[cfg(feature = "discord")]
pub mod discord;
pub mod format;
pub mod log;

#[cfg(feature = "discord")]
pub use discord::DiscordWebhookSender;
pub use log::LogAlertSender;
