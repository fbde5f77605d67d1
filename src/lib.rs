//! Sharpedge - +EV scanner for sportsbook player props.
//!
//! Polls an odds provider for upcoming events, derives a vig-free fair line
//! for every two-way outcome (from a sharp book, or a weighted consensus when
//! the sharp book is missing), and flags book prices whose edge over that
//! line falls inside a configured band. Accepted bets are sized with
//! fractional Kelly and delivered to alert channels.
//!
//! # Architecture
//!
//! - [`domain`] - Pure odds math: conversions, devig, consensus, edge,
//!   Kelly sizing, fair value history
//! - [`port`] - Traits for the odds provider and alert channels
//! - [`application`] - Outcome evaluation, the scan cycle and the scan loop
//! - [`adapter`] - The Odds API client, log/Discord alerts, the CLI
//! - [`infrastructure`] - Configuration, logging and component factories
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `discord` (default) - Discord webhook alerts
//! - `testkit` - Scripted provider and alert senders for integration tests
//!
//! # Example
//!
//! ```
//! use sharpedge::domain::fair::devig;
//! use sharpedge::domain::odds::Price;
//!
//! let over = Price::new(-110).unwrap();
//! let under = Price::new(-110).unwrap();
//! let fair = devig(over, under);
//! assert!((fair.probability_a - 0.5).abs() < 1e-12);
//! assert!(fair.hold > 0.04);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
