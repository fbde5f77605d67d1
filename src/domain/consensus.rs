//! Weighted multi-book consensus line.
//!
//! When the sharp book is missing, a reference line is synthesized from the
//! books in a reliability-weighted table. The result is still a vigged
//! two-way line; callers devig it with [`super::fair::devig`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::OddsError;
use super::id::BookName;
use super::market::{MarketSnapshot, Side};
use super::odds::{probability_to_american, Price};

/// Book → reliability weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct BookWeights(HashMap<BookName, f64>);

impl BookWeights {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a weight.
    #[must_use]
    pub fn with(mut self, book: impl Into<BookName>, weight: f64) -> Self {
        self.0.insert(book.into(), weight);
        self
    }

    /// Weight for a book. Books with a non-positive weight count as absent.
    #[must_use]
    pub fn weight(&self, book: &BookName) -> Option<f64> {
        self.0.get(book).copied().filter(|w| *w > 0.0)
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&BookName, f64)> {
        self.0.iter().map(|(book, weight)| (book, *weight))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, f64>> for BookWeights {
    fn from(map: HashMap<String, f64>) -> Self {
        Self(
            map.into_iter()
                .map(|(book, weight)| (BookName::new(book), weight))
                .collect(),
        )
    }
}

impl From<BookWeights> for HashMap<String, f64> {
    fn from(weights: BookWeights) -> Self {
        weights
            .0
            .into_iter()
            .map(|(book, weight)| (book.as_str().to_string(), weight))
            .collect()
    }
}

/// Why no consensus could be formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    /// Fewer weighted books quote the outcome, or both of its sides, than
    /// required.
    InsufficientBooks { qualifying: usize, required: usize },
    /// No weighted book quotes both sides.
    NoOpposingQuote,
    /// Books disagree beyond tolerance on both sides.
    Disagreement,
}

/// A consensus two-way line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsensusLine {
    /// Consensus price of the requested side.
    pub main_price: Price,
    /// Consensus price of the complementary side.
    pub opposing_price: Price,
    /// Weighted average implied probability of the requested side.
    pub main_probability: f64,
    /// Weighted average implied probability of the complementary side.
    pub opposing_probability: f64,
    /// Books that quoted both sides and were averaged.
    pub contributing_books: usize,
    /// Largest single-book deviation on the requested side.
    pub max_main_diff: f64,
    /// Largest single-book deviation on the complementary side.
    pub max_opposing_diff: f64,
}

/// Outcome of a consensus attempt.
///
/// Unavailability is expected and frequent; it is a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsensusResult {
    Available(ConsensusLine),
    Unavailable(Unavailable),
}

impl ConsensusResult {
    /// The line, if one was formed.
    #[must_use]
    pub fn line(&self) -> Option<&ConsensusLine> {
        match self {
            Self::Available(line) => Some(line),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

struct BookLine<'a> {
    book: &'a BookName,
    main_prob: f64,
    opp_prob: f64,
    weight: f64,
}

/// Builds consensus lines from a weight table and tolerance settings.
#[derive(Debug, Clone)]
pub struct ConsensusBuilder {
    weights: BookWeights,
    min_books: usize,
    max_prob_diff: f64,
}

impl ConsensusBuilder {
    #[must_use]
    pub fn new(weights: BookWeights, min_books: usize, max_prob_diff: f64) -> Self {
        Self {
            weights,
            min_books,
            max_prob_diff,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &BookWeights {
        &self.weights
    }

    #[must_use]
    pub const fn min_books(&self) -> usize {
        self.min_books
    }

    /// Build a consensus line for `side` of `snapshot`.
    ///
    /// Only an invalid averaged probability can produce an `Err`; that would
    /// mean a quote upstream violated the price invariant.
    pub fn build(
        &self,
        snapshot: &MarketSnapshot,
        side: Side,
    ) -> Result<ConsensusResult, OddsError> {
        let qualifying: Vec<(&BookName, Price, f64)> = snapshot
            .quotes_for(side)
            .filter_map(|q| self.weights.weight(&q.book).map(|w| (&q.book, q.price, w)))
            .collect();

        if qualifying.len() < self.min_books {
            debug!(
                market = %snapshot.market_key,
                qualifying = qualifying.len(),
                required = self.min_books,
                "Insufficient bookmakers for consensus"
            );
            return Ok(ConsensusResult::Unavailable(Unavailable::InsufficientBooks {
                qualifying: qualifying.len(),
                required: self.min_books,
            }));
        }

        let lines: Vec<BookLine<'_>> = qualifying
            .into_iter()
            .filter_map(|(book, main_price, weight)| {
                let opposing = snapshot.quote(book, side.opposite())?;
                Some(BookLine {
                    book,
                    main_prob: main_price.implied_probability(),
                    opp_prob: opposing.price.implied_probability(),
                    weight,
                })
            })
            .collect();

        if lines.is_empty() {
            return Ok(ConsensusResult::Unavailable(Unavailable::NoOpposingQuote));
        }
        if lines.len() < self.min_books {
            debug!(
                market = %snapshot.market_key,
                two_way = lines.len(),
                required = self.min_books,
                "Too few two-way quotes for consensus"
            );
            return Ok(ConsensusResult::Unavailable(Unavailable::InsufficientBooks {
                qualifying: lines.len(),
                required: self.min_books,
            }));
        }

        let total_weight: f64 = lines.iter().map(|l| l.weight).sum();
        let main_prob = lines.iter().map(|l| l.main_prob * l.weight).sum::<f64>() / total_weight;
        let opp_prob = lines.iter().map(|l| l.opp_prob * l.weight).sum::<f64>() / total_weight;

        let mut max_main_diff: f64 = 0.0;
        let mut max_opp_diff: f64 = 0.0;
        for line in &lines {
            max_main_diff = max_main_diff.max((line.main_prob - main_prob).abs());
            max_opp_diff = max_opp_diff.max((line.opp_prob - opp_prob).abs());
            debug!(
                book = %line.book,
                weight = line.weight,
                main_prob = line.main_prob,
                opp_prob = line.opp_prob,
                hold = line.main_prob + line.opp_prob - 1.0,
                "Consensus input"
            );
        }

        // Either side agreeing is enough to keep the line.
        if max_main_diff > self.max_prob_diff && max_opp_diff > self.max_prob_diff {
            debug!(
                market = %snapshot.market_key,
                max_main_diff,
                max_opp_diff,
                tolerance = self.max_prob_diff,
                "Odds difference too high for consensus"
            );
            return Ok(ConsensusResult::Unavailable(Unavailable::Disagreement));
        }

        Ok(ConsensusResult::Available(ConsensusLine {
            main_price: probability_to_american(main_prob)?,
            opposing_price: probability_to_american(opp_prob)?,
            main_probability: main_prob,
            opposing_probability: opp_prob,
            contributing_books: lines.len(),
            max_main_diff,
            max_opposing_diff: max_opp_diff,
        }))
    }
}
