//! Pure betting math and domain types.
//!
//! Nothing here performs I/O. The math is synchronous and deterministic;
//! [`EventHistory`] is the only shared state.

pub mod consensus;
pub mod edge;
pub mod error;
pub mod fair;
pub mod history;
pub mod id;
pub mod kelly;
pub mod market;
pub mod odds;
pub mod opportunity;
pub mod stats;

pub use consensus::{BookWeights, ConsensusBuilder, ConsensusLine, ConsensusResult, Unavailable};
pub use edge::{is_plus_ev, EdgeBand, EdgeCalculator, EdgeEstimate};
pub use error::OddsError;
pub use fair::{devig, FairValue};
pub use history::{EventHistory, OutcomeKey};
pub use id::{BookName, EventId, MarketKey};
pub use kelly::{BetSizing, KellySizer};
pub use market::{BookQuote, EventRef, EventSnapshot, MarketSnapshot, Side};
pub use odds::Price;
pub use opportunity::{FairSource, Opportunity};
pub use stats::{ScanReport, ScanStats};
