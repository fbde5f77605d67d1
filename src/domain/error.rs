//! Domain validation errors for odds and probabilities.
//!
//! These are programmer / data-contract errors: a zero American price or a
//! probability outside (0, 1) means something upstream handed the core a
//! value it should never have produced. They are returned immediately and
//! never swallowed.
//!
//! # Examples
//!
//! ```
//! use sharpedge::domain::error::OddsError;
//! use sharpedge::domain::odds::Price;
//!
//! assert!(matches!(Price::new(0), Err(OddsError::InvalidPrice { price: 0 })));
//! ```

use thiserror::Error;

/// Errors raised when odds or probability invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OddsError {
    /// American odds of exactly zero do not describe a payout.
    #[error("invalid American price {price}: must be non-zero")]
    InvalidPrice {
        /// The rejected price.
        price: i32,
    },

    /// Probabilities must lie strictly between 0 and 1.
    #[error("invalid probability {probability}: must be in (0, 1)")]
    InvalidProbability {
        /// The rejected probability.
        probability: f64,
    },
}
