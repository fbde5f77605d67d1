//! Vig removal.
//!
//! Strips the bookmaker margin from a two-way price by proportional
//! normalization of the implied probabilities.

use serde::Serialize;

use super::error::OddsError;
use super::odds::{probability_to_american, probability_to_american_exact, Price};

/// No-vig probabilities for a two-way market.
///
/// `probability_a + probability_b == 1` up to floating error. Probabilities
/// are authoritative; the American prices are for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairValue {
    /// Fair probability of side A.
    pub probability_a: f64,
    /// Fair probability of side B.
    pub probability_b: f64,
    /// Margin removed, `max(0, implied_a + implied_b - 1)`.
    pub hold: f64,
    /// Number of books behind the reference line (1 for a single sharp book).
    pub contributing_books: usize,
}

impl FairValue {
    /// Fair probability for side A (`true`) or side B (`false`).
    #[must_use]
    pub const fn probability(&self, side_a: bool) -> f64 {
        if side_a {
            self.probability_a
        } else {
            self.probability_b
        }
    }

    /// Rounded fair American price for display.
    pub fn fair_price(&self, side_a: bool) -> Result<Price, OddsError> {
        probability_to_american(self.probability(side_a))
    }

    /// Unrounded fair American price, used to measure drift between scans.
    pub fn fair_price_exact(&self, side_a: bool) -> Result<f64, OddsError> {
        probability_to_american_exact(self.probability(side_a))
    }

    /// Record how many books the reference line was built from.
    #[must_use]
    pub const fn with_contributing_books(mut self, books: usize) -> Self {
        self.contributing_books = books;
        self
    }
}

/// Margin of a two-way price, clamped to be non-negative.
#[must_use]
pub fn hold(price_a: Price, price_b: Price) -> f64 {
    (price_a.implied_probability() + price_b.implied_probability() - 1.0).max(0.0)
}

/// Remove the vig from two complementary prices quoted by one source.
#[must_use]
pub fn devig(price_a: Price, price_b: Price) -> FairValue {
    let prob_a = price_a.implied_probability();
    let prob_b = price_b.implied_probability();
    let total = prob_a + prob_b;

    FairValue {
        probability_a: prob_a / total,
        probability_b: prob_b / total,
        hold: (total - 1.0).max(0.0),
        contributing_books: 1,
    }
}
