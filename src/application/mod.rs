//! Application layer: the scan use case.
//!
//! - [`outcome`] - fair line, edge, filter and sizing for one outcome
//! - [`scanner`] - one scan cycle over all upcoming events
//! - [`runtime`] - the repeating loop with backoff and shutdown

pub mod outcome;
pub mod runtime;
pub mod scanner;

pub use outcome::{FairLookup, FairReference, Pricing};
pub use runtime::{RuntimeSummary, ScanRuntime, Schedule};
pub use scanner::{Scanner, ScannerSettings};
