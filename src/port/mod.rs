//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  Scanner + scan runtime  │
//!                 └────────────┬─────────────┘
//!            ┌─────────────────┴────────────────┐
//!            ▼                                  ▼
//!     ┌──────────────┐                   ┌─────────────┐
//!     │ OddsProvider │                   │ AlertSender │
//!     └──────────────┘                   └─────────────┘
//! ```
//!
//! - [`OddsProvider`] - upcoming events and per-event market snapshots
//! - [`AlertSender`] - delivery of accepted opportunities

pub mod outbound;

pub use outbound::alert::{AlertRegistry, AlertSender, NullAlertSender};
pub use outbound::provider::OddsProvider;
