//! Fair-value, edge and sizing configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::consensus::{BookWeights, ConsensusBuilder};
use crate::domain::edge::{EdgeBand, EdgeCalculator};
use crate::domain::id::BookName;
use crate::domain::kelly::KellySizer;

/// Reference line settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsensusConfig {
    /// Book whose two-way quote is trusted as-is (default: pinnacle).
    #[serde(default = "default_sharp_book")]
    pub sharp_book: String,
    /// Weighted books required before a consensus is formed (default: 2).
    #[serde(default = "default_min_books")]
    pub min_books: usize,
    /// Largest tolerated deviation from the weighted average (default: 0.10).
    #[serde(default = "default_max_prob_diff")]
    pub max_prob_diff: f64,
    #[serde(default = "default_weights")]
    pub weights: BookWeights,
}

fn default_sharp_book() -> String {
    "pinnacle".into()
}

const fn default_min_books() -> usize {
    2
}

const fn default_max_prob_diff() -> f64 {
    0.10
}

fn default_weights() -> BookWeights {
    BookWeights::new()
        .with("pinnacle", 0.5)
        .with("betonlineag", 0.4)
        .with("fanduel", 0.3)
        .with("draftkings", 0.3)
        .with("betmgm", 0.3)
        .with("betrivers", 0.2)
        .with("prophetx", 0.2)
        .with("underdog", 0.2)
        .with("fliff", 0.2)
}

impl ConsensusConfig {
    #[must_use]
    pub fn sharp_book(&self) -> BookName {
        BookName::new(self.sharp_book.as_str())
    }

    #[must_use]
    pub fn builder(&self) -> ConsensusBuilder {
        ConsensusBuilder::new(self.weights.clone(), self.min_books, self.max_prob_diff)
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            sharp_book: default_sharp_book(),
            min_books: default_min_books(),
            max_prob_diff: default_max_prob_diff(),
            weights: default_weights(),
        }
    }
}

/// Edge filter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeConfig {
    /// Edges at or below this are ignored (default: 0.02).
    #[serde(default = "default_min_edge")]
    pub min_edge: f64,
    /// Edges above this are treated as bad data (default: 0.20).
    #[serde(default = "default_max_edge")]
    pub max_edge: f64,
    /// Cap on |edge| applied before filtering (default: 0.15).
    #[serde(default = "default_max_edge_calc")]
    pub max_edge_calc: f64,
}

const fn default_min_edge() -> f64 {
    0.02
}

const fn default_max_edge() -> f64 {
    0.20
}

const fn default_max_edge_calc() -> f64 {
    0.15
}

impl EdgeConfig {
    #[must_use]
    pub fn calculator(&self) -> EdgeCalculator {
        EdgeCalculator::new(self.max_edge_calc)
    }

    #[must_use]
    pub const fn band(&self) -> EdgeBand {
        EdgeBand::new(self.min_edge, self.max_edge)
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            min_edge: default_min_edge(),
            max_edge: default_max_edge(),
            max_edge_calc: default_max_edge_calc(),
        }
    }
}

/// Bet sizing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SizingConfig {
    /// Multiplier on full Kelly (default: 0.25).
    #[serde(default = "default_kelly_fraction")]
    pub kelly_fraction: f64,
    /// Bankroll in dollars (default: 1000).
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,
    /// One unit, and the minimum stake, as a bankroll fraction (default: 0.01).
    #[serde(default = "default_min_unit_pct")]
    pub min_unit_pct: f64,
    /// Maximum stake as a bankroll fraction (default: 0.03).
    #[serde(default = "default_max_unit_pct")]
    pub max_unit_pct: f64,
}

const fn default_kelly_fraction() -> f64 {
    0.25
}

fn default_bankroll() -> Decimal {
    Decimal::from(1000)
}

const fn default_min_unit_pct() -> f64 {
    0.01
}

const fn default_max_unit_pct() -> f64 {
    0.03
}

impl SizingConfig {
    #[must_use]
    pub fn sizer(&self) -> KellySizer {
        KellySizer::new(
            self.kelly_fraction,
            self.bankroll,
            self.min_unit_pct,
            self.max_unit_pct,
        )
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            kelly_fraction: default_kelly_fraction(),
            bankroll: default_bankroll(),
            min_unit_pct: default_min_unit_pct(),
            max_unit_pct: default_max_unit_pct(),
        }
    }
}
