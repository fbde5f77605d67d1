//! Outbound adapters.

pub mod alert;
pub mod odds_api;
