//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`]: scripted [`OddsProvider`](crate::port::OddsProvider) with
//!   per-event failures, a request budget and call counters.
//! - [`alert`]: recording and failing [`AlertSender`](crate::port::AlertSender)s.
//! - [`domain`]: builders for events, market snapshots, opportunities and
//!   scanner settings.

pub mod alert;
pub mod domain;
pub mod provider;
