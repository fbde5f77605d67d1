//! Market snapshot types.
//!
//! A [`MarketSnapshot`] is one two-way market (a moneyline, a total, or a
//! single player's prop at one line) as quoted by every book in a single
//! polling pass. Snapshots are built by the provider adapter from already
//! validated data and are immutable afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BookName, EventId, MarketKey};
use super::odds::Price;

/// One side of a two-way market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
    Home,
    Away,
}

impl Side {
    /// The complementary outcome.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Over => Self::Under,
            Self::Under => Self::Over,
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }

    /// Canonical "side A" of the pair (`Over` / `Home`).
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Over | Self::Home)
    }

    /// Both sides of this side's pair, primary first.
    #[must_use]
    pub const fn pair(self) -> [Self; 2] {
        if self.is_primary() {
            [self, self.opposite()]
        } else {
            [self.opposite(), self]
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Over => "Over",
            Self::Under => "Under",
            Self::Home => "Home",
            Self::Away => "Away",
        };
        f.write_str(label)
    }
}

/// A single book's price on one side of a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookQuote {
    pub book: BookName,
    pub side: Side,
    pub price: Price,
    /// Maximum stake the book accepts, when reported. Display only.
    pub bet_limit: Option<f64>,
    /// Deep link to the bet slip, when reported.
    pub link: Option<String>,
}

impl BookQuote {
    /// Create a quote without limit or link.
    pub fn new(book: impl Into<BookName>, side: Side, price: Price) -> Self {
        Self {
            book: book.into(),
            side,
            price,
            bet_limit: None,
            link: None,
        }
    }

    /// Attach a bet limit.
    #[must_use]
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.bet_limit = Some(limit);
        self
    }

    /// Attach a deep link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Reference to an upcoming event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    pub id: EventId,
    pub sport_key: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: Option<DateTime<Utc>>,
}

impl EventRef {
    /// "Away @ Home" label.
    #[must_use]
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// One two-way market as quoted by all books in a polling pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub event_id: EventId,
    pub market_key: MarketKey,
    /// Player name for props, `None` for game markets.
    pub participant: Option<String>,
    /// Line for totals, spreads and props.
    pub line_value: Option<f64>,
    pub quotes: Vec<BookQuote>,
    pub commence_time: Option<DateTime<Utc>>,
}

impl MarketSnapshot {
    /// Create an empty snapshot.
    pub fn new(event_id: impl Into<EventId>, market_key: impl Into<MarketKey>) -> Self {
        Self {
            event_id: event_id.into(),
            market_key: market_key.into(),
            participant: None,
            line_value: None,
            quotes: Vec::new(),
            commence_time: None,
        }
    }

    /// Set the participant.
    #[must_use]
    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Some(participant.into());
        self
    }

    /// Set the line.
    #[must_use]
    pub fn with_line(mut self, line: f64) -> Self {
        self.line_value = Some(line);
        self
    }

    /// Append a quote.
    #[must_use]
    pub fn with_quote(mut self, quote: BookQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// The two sides priced in this market, primary first.
    ///
    /// Returns `None` for an empty snapshot.
    #[must_use]
    pub fn sides(&self) -> Option<[Side; 2]> {
        self.quotes.first().map(|q| q.side.pair())
    }

    /// The given book's quote on the given side.
    #[must_use]
    pub fn quote(&self, book: &BookName, side: Side) -> Option<&BookQuote> {
        self.quotes
            .iter()
            .find(|q| &q.book == book && q.side == side)
    }

    /// All quotes on one side, in snapshot order.
    pub fn quotes_for(&self, side: Side) -> impl Iterator<Item = &BookQuote> {
        self.quotes.iter().filter(move |q| q.side == side)
    }

    /// Distinct books present in the snapshot, in first-seen order.
    #[must_use]
    pub fn books(&self) -> Vec<&BookName> {
        let mut books: Vec<&BookName> = Vec::new();
        for quote in &self.quotes {
            if !books.contains(&&quote.book) {
                books.push(&quote.book);
            }
        }
        books
    }

    /// Short label such as `LeBron James Points Over 24.5`.
    #[must_use]
    pub fn describe(&self, side: Side) -> String {
        outcome_label(
            self.participant.as_deref(),
            &self.market_key,
            side,
            self.line_value,
        )
    }
}

/// Label for one side of a market: participant, market name, side and line,
/// each omitted when absent.
#[must_use]
pub fn outcome_label(
    participant: Option<&str>,
    market_key: &MarketKey,
    side: Side,
    line: Option<f64>,
) -> String {
    let mut parts = Vec::with_capacity(4);
    if let Some(participant) = participant {
        parts.push(participant.to_string());
    }
    parts.push(market_key.display_name());
    parts.push(side.to_string());
    if let Some(line) = line {
        parts.push(line.to_string());
    }
    parts.join(" ")
}

/// Everything the provider returned for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub event: EventRef,
    pub markets: Vec<MarketSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(v: i32) -> Price {
        Price::new(v).unwrap()
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::new("evt-1", "player_points")
            .with_participant("Jayson Tatum")
            .with_line(27.5)
            .with_quote(BookQuote::new("pinnacle", Side::Under, price(-115)))
            .with_quote(BookQuote::new("pinnacle", Side::Over, price(-105)))
            .with_quote(BookQuote::new("fanduel", Side::Over, price(110)))
    }

    #[test]
    fn test_side_pairs() {
        assert_eq!(Side::Over.opposite(), Side::Under);
        assert_eq!(Side::Away.opposite(), Side::Home);
        assert_eq!(Side::Under.pair(), [Side::Over, Side::Under]);
        assert_eq!(Side::Home.pair(), [Side::Home, Side::Away]);
    }

    #[test]
    fn test_sides_are_primary_first() {
        assert_eq!(snapshot().sides(), Some([Side::Over, Side::Under]));
        assert_eq!(MarketSnapshot::new("e", "h2h").sides(), None);
    }

    #[test]
    fn test_quote_lookup() {
        let snap = snapshot();
        let pin = BookName::from("pinnacle");
        assert_eq!(snap.quote(&pin, Side::Over).unwrap().price.value(), -105);
        assert!(snap.quote(&BookName::from("fanduel"), Side::Under).is_none());
        assert_eq!(snap.quotes_for(Side::Over).count(), 2);
    }

    #[test]
    fn test_books_are_distinct_in_order() {
        let snap = snapshot();
        let books: Vec<&str> = snap.books().iter().map(|b| b.as_str()).collect();
        assert_eq!(books, vec!["pinnacle", "fanduel"]);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            snapshot().describe(Side::Over),
            "Jayson Tatum Points Over 27.5"
        );
    }

    #[test]
    fn test_outcome_label_skips_missing_parts() {
        let key = MarketKey::from("player_rebounds");
        assert_eq!(
            outcome_label(None, &key, Side::Under, None),
            format!("{} Under", key.display_name())
        );
        assert_eq!(
            outcome_label(Some("Bam Adebayo"), &key, Side::Over, Some(8.5)),
            format!("Bam Adebayo {} Over 8.5", key.display_name())
        );
    }
}
