//! Accepted +EV opportunities.
//!
//! An [`Opportunity`] is emitted once per accepted (book, outcome) pair in a
//! scan. It carries everything an alert sink needs to render it without
//! going back to the snapshot.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::id::{BookName, EventId, MarketKey};
use super::market::{outcome_label, Side};
use super::odds::Price;

/// Where the fair line came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FairSource {
    /// The sharp book's own two-way quote, devigged.
    Sharp {
        book: BookName,
        price: Price,
        opposing_price: Price,
        /// The sharp book's limit on the evaluated side, when reported.
        bet_limit: Option<f64>,
    },
    /// A weighted consensus of several books, devigged.
    Consensus {
        books: usize,
        price: Price,
        opposing_price: Price,
    },
}

impl FairSource {
    /// Reference price on the evaluated side, before vig removal.
    #[must_use]
    pub const fn reference_price(&self) -> Price {
        match self {
            Self::Sharp { price, .. } | Self::Consensus { price, .. } => *price,
        }
    }

    /// Reference price on the other side, before vig removal.
    #[must_use]
    pub const fn opposing_price(&self) -> Price {
        match self {
            Self::Sharp { opposing_price, .. } | Self::Consensus { opposing_price, .. } => {
                *opposing_price
            }
        }
    }

    #[must_use]
    pub const fn is_consensus(&self) -> bool {
        matches!(self, Self::Consensus { .. })
    }
}

impl fmt::Display for FairSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sharp {
                book,
                price,
                opposing_price,
                ..
            } => write!(f, "{book} {price}/{opposing_price}"),
            Self::Consensus {
                books,
                price,
                opposing_price,
            } => write!(f, "consensus of {books} books {price}/{opposing_price}"),
        }
    }
}

/// A bet whose edge passed the filter, with its recommended size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub event_id: EventId,
    /// "Away @ Home".
    pub matchup: String,
    pub market_key: MarketKey,
    pub participant: Option<String>,
    pub line_value: Option<f64>,
    pub side: Side,
    pub book: BookName,
    pub offered_price: Price,
    pub fair_price: Price,
    pub fair_probability: f64,
    pub hold: f64,
    pub edge: f64,
    pub ev_pct: f64,
    pub recommended_units: f64,
    pub recommended_dollars: Decimal,
    /// Percent change of the fair price since the previous scan.
    pub fair_value_delta: f64,
    pub fair_source: FairSource,
    pub bet_limit: Option<f64>,
    pub link: Option<String>,
    pub commence_time: Option<DateTime<Utc>>,
}

impl Opportunity {
    /// Short label such as `Jayson Tatum Points Over 27.5`.
    #[must_use]
    pub fn describe(&self) -> String {
        outcome_label(
            self.participant.as_deref(),
            &self.market_key,
            self.side,
            self.line_value,
        )
    }
}

impl fmt::Display for Opportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} {} (fair {}, edge {:.2}%, {:.2}u)",
            self.describe(),
            self.book,
            self.offered_price,
            self.fair_price,
            self.edge * 100.0,
            self.recommended_units
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn price(v: i32) -> Price {
        Price::new(v).unwrap()
    }

    fn opportunity() -> Opportunity {
        Opportunity {
            event_id: EventId::from("evt-1"),
            matchup: "Celtics @ Knicks".into(),
            market_key: MarketKey::from("player_points"),
            participant: Some("Jalen Brunson".into()),
            line_value: Some(26.5),
            side: Side::Over,
            book: BookName::from("fanduel"),
            offered_price: price(120),
            fair_price: price(-105),
            fair_probability: 0.512,
            hold: 0.04,
            edge: 0.1264,
            ev_pct: 12.64,
            recommended_units: 3.0,
            recommended_dollars: dec!(30.00),
            fair_value_delta: 0.0,
            fair_source: FairSource::Sharp {
                book: BookName::from("pinnacle"),
                price: price(-110),
                opposing_price: price(-110),
                bet_limit: Some(2500.0),
            },
            bet_limit: None,
            link: None,
            commence_time: None,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            opportunity().to_string(),
            "Jalen Brunson Points Over 26.5 @ fanduel +120 (fair -105, edge 12.64%, 3.00u)"
        );
    }

    #[test]
    fn test_fair_source_accessors() {
        let source = FairSource::Consensus {
            books: 3,
            price: price(-115),
            opposing_price: price(-105),
        };
        assert!(source.is_consensus());
        assert_eq!(source.reference_price(), price(-115));
        assert_eq!(source.opposing_price(), price(-105));
        assert_eq!(source.to_string(), "consensus of 3 books -115/-105");
    }

    #[test]
    fn test_serializes_source_tag() {
        let json = serde_json::to_value(opportunity()).unwrap();
        assert_eq!(json["fair_source"]["kind"], "sharp");
        assert_eq!(json["offered_price"], 120);
    }
}
