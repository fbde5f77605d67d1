//! Per-outcome pricing: fair reference, edge, filter and sizing.
//!
//! Everything here is synchronous. The scanner calls [`Pricing::evaluate`]
//! once per side of every market and handles delivery itself.

use tracing::{debug, warn};

use crate::domain::consensus::{ConsensusBuilder, ConsensusResult, Unavailable};
use crate::domain::edge::{EdgeBand, EdgeCalculator};
use crate::domain::error::OddsError;
use crate::domain::fair::{devig, FairValue};
use crate::domain::history::{EventHistory, OutcomeKey};
use crate::domain::id::BookName;
use crate::domain::kelly::KellySizer;
use crate::domain::market::{EventRef, MarketSnapshot, Side};
use crate::domain::opportunity::{FairSource, Opportunity};
use crate::domain::stats::ScanStats;

/// Fair line for one side of a market. `fair.probability_a` is the
/// evaluated side.
#[derive(Debug, Clone, PartialEq)]
pub struct FairReference {
    pub fair: FairValue,
    pub source: FairSource,
}

/// Result of looking for a fair line.
#[derive(Debug, Clone, PartialEq)]
pub enum FairLookup {
    Found(FairReference),
    Unavailable(Unavailable),
}

/// Pricing settings shared by every outcome in a scan.
#[derive(Debug, Clone)]
pub struct Pricing {
    pub sharp_book: BookName,
    pub consensus: ConsensusBuilder,
    pub edge: EdgeCalculator,
    pub band: EdgeBand,
    pub sizer: KellySizer,
}

impl Pricing {
    /// Fair line for `side`: the sharp book's two-way quote when it has
    /// one, otherwise a devigged consensus.
    pub fn fair_reference(
        &self,
        market: &MarketSnapshot,
        side: Side,
    ) -> Result<FairLookup, OddsError> {
        let sharp = (
            market.quote(&self.sharp_book, side),
            market.quote(&self.sharp_book, side.opposite()),
        );
        if let (Some(main), Some(opposing)) = sharp {
            return Ok(FairLookup::Found(FairReference {
                fair: devig(main.price, opposing.price),
                source: FairSource::Sharp {
                    book: self.sharp_book.clone(),
                    price: main.price,
                    opposing_price: opposing.price,
                    bet_limit: main.bet_limit,
                },
            }));
        }

        match self.consensus.build(market, side)? {
            ConsensusResult::Available(line) => Ok(FairLookup::Found(FairReference {
                fair: devig(line.main_price, line.opposing_price)
                    .with_contributing_books(line.contributing_books),
                source: FairSource::Consensus {
                    books: line.contributing_books,
                    price: line.main_price,
                    opposing_price: line.opposing_price,
                },
            })),
            ConsensusResult::Unavailable(reason) => Ok(FairLookup::Unavailable(reason)),
        }
    }

    /// Evaluate every book quoting `side` against the fair line and return
    /// the accepted opportunities in quote order.
    ///
    /// Records the fair price in `history` whenever a fair line exists, so
    /// the drift is tracked even for outcomes with no accepted bet.
    pub fn evaluate(
        &self,
        event: &EventRef,
        market: &MarketSnapshot,
        side: Side,
        history: &EventHistory,
        stats: &mut ScanStats,
    ) -> Vec<Opportunity> {
        let reference = match self.fair_reference(market, side) {
            Ok(FairLookup::Found(reference)) => reference,
            Ok(FairLookup::Unavailable(reason)) => {
                debug!(
                    event_id = %market.event_id,
                    outcome = %market.describe(side),
                    reason = ?reason,
                    "No fair line"
                );
                stats.record_unavailable(reason);
                return Vec::new();
            }
            Err(e) => {
                warn!(outcome = %market.describe(side), error = %e, "Fair line failed");
                stats.errors += 1;
                return Vec::new();
            }
        };

        if reference.source.is_consensus() {
            stats.fair_from_consensus += 1;
        } else {
            stats.fair_from_sharp += 1;
        }

        let fair_probability = reference.fair.probability_a;
        let (fair_price, fair_exact) = match (
            reference.fair.fair_price(true),
            reference.fair.fair_price_exact(true),
        ) {
            (Ok(price), Ok(exact)) => (price, exact),
            (Err(e), _) | (_, Err(e)) => {
                warn!(outcome = %market.describe(side), error = %e, "Fair price failed");
                stats.errors += 1;
                return Vec::new();
            }
        };
        let fair_value_delta =
            history.record(&market.event_id, OutcomeKey::new(market, side), fair_exact);

        let mut accepted = Vec::new();
        for quote in market.quotes_for(side) {
            if !reference.source.is_consensus() && quote.book == self.sharp_book {
                continue;
            }
            stats.quotes_compared += 1;

            let estimate = match self.edge.evaluate(quote.price, fair_probability) {
                Ok(estimate) => estimate,
                Err(e) => {
                    warn!(book = %quote.book, error = %e, "Edge calculation failed");
                    stats.errors += 1;
                    continue;
                }
            };
            if estimate.edge > 0.0 {
                stats.positive_edges += 1;
            }

            debug!(
                book = %quote.book,
                outcome = %market.describe(side),
                offered = %quote.price,
                fair = %fair_price,
                edge = estimate.edge,
                raw_edge = estimate.raw_edge,
                "Edge calculated"
            );

            if !self.band.accepts(estimate.edge) {
                continue;
            }

            let sizing = self.sizer.size(estimate.edge, quote.price);
            stats.opportunities_accepted += 1;

            accepted.push(Opportunity {
                event_id: market.event_id.clone(),
                matchup: event.matchup(),
                market_key: market.market_key.clone(),
                participant: market.participant.clone(),
                line_value: market.line_value,
                side,
                book: quote.book.clone(),
                offered_price: quote.price,
                fair_price,
                fair_probability,
                hold: reference.fair.hold,
                edge: estimate.edge,
                ev_pct: estimate.ev_pct,
                recommended_units: sizing.units,
                recommended_dollars: sizing.dollars,
                fair_value_delta,
                fair_source: reference.source.clone(),
                bet_limit: quote.bet_limit,
                link: quote.link.clone(),
                commence_time: market.commence_time.or(event.commence_time),
            });
        }

        accepted
    }
}
