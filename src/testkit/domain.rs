//! Builders for domain primitives used across tests.
//!
//! The canned markets are priced so the outcome is obvious from the numbers:
//! the fair line is always 50/50 and only the `+115` quote clears the edge
//! band (7.5% edge).

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::application::{Pricing, ScannerSettings};
use crate::domain::consensus::{BookWeights, ConsensusBuilder};
use crate::domain::edge::{EdgeBand, EdgeCalculator};
use crate::domain::id::{BookName, EventId};
use crate::domain::kelly::KellySizer;
use crate::domain::market::{BookQuote, EventRef, EventSnapshot, MarketSnapshot, Side};
use crate::domain::odds::Price;
use crate::domain::opportunity::{FairSource, Opportunity};

/// Create a [`Price`], panicking on an invalid value.
pub fn price(value: i32) -> Price {
    Price::new(value).unwrap()
}

/// Tip-off used by every canned event.
pub fn tip_off() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 0, 10, 0).unwrap()
}

/// Celtics vs Heat with the given id.
pub fn event(id: &str) -> EventRef {
    EventRef {
        id: EventId::from(id),
        sport_key: "basketball_nba".into(),
        home_team: "Boston Celtics".into(),
        away_team: "Miami Heat".into(),
        commence_time: Some(tip_off()),
    }
}

/// Points prop with a Pinnacle two-way line at -110/-110.
///
/// FanDuel's `+115` Over is the only accepted bet; the Pinnacle quotes
/// themselves are never compared.
pub fn sharp_market(event_id: &str, participant: &str) -> MarketSnapshot {
    MarketSnapshot::new(event_id, "player_points")
        .with_participant(participant)
        .with_line(22.5)
        .with_quote(BookQuote::new("pinnacle", Side::Over, price(-110)).with_limit(500.0))
        .with_quote(BookQuote::new("pinnacle", Side::Under, price(-110)))
        .with_quote(
            BookQuote::new("fanduel", Side::Over, price(115)).with_link("https://fanduel/slip"),
        )
        .with_quote(BookQuote::new("draftkings", Side::Over, price(-105)))
}

/// Rebounds prop without Pinnacle; FanDuel and DraftKings agree at -110/-110.
///
/// BetRivers' `+115` Over carries no weight, so it is compared but does not
/// contribute to the consensus.
pub fn consensus_market(event_id: &str, participant: &str) -> MarketSnapshot {
    MarketSnapshot::new(event_id, "player_rebounds")
        .with_participant(participant)
        .with_line(8.5)
        .with_quote(BookQuote::new("fanduel", Side::Over, price(-110)))
        .with_quote(BookQuote::new("fanduel", Side::Under, price(-110)))
        .with_quote(BookQuote::new("draftkings", Side::Over, price(-110)))
        .with_quote(BookQuote::new("draftkings", Side::Under, price(-110)))
        .with_quote(BookQuote::new("betrivers", Side::Over, price(115)))
}

/// Assists prop quoted by a single weighted book.
pub fn thin_market(event_id: &str, participant: &str) -> MarketSnapshot {
    MarketSnapshot::new(event_id, "player_assists")
        .with_participant(participant)
        .with_line(4.5)
        .with_quote(BookQuote::new("fanduel", Side::Over, price(120)))
        .with_quote(BookQuote::new("fanduel", Side::Under, price(-140)))
}

/// Snapshot of [`event`] with the given markets.
pub fn snapshot(id: &str, markets: Vec<MarketSnapshot>) -> EventSnapshot {
    EventSnapshot {
        event: event(id),
        markets,
    }
}

/// Snapshot with `n` sharp markets for different players.
pub fn sharp_snapshot(id: &str, n: usize) -> EventSnapshot {
    let markets = (0..n)
        .map(|i| sharp_market(id, &format!("Player {i}")))
        .collect();
    snapshot(id, markets)
}

/// Pricing matching the default configuration, with a smaller weight table.
pub fn pricing() -> Pricing {
    Pricing {
        sharp_book: BookName::from("pinnacle"),
        consensus: ConsensusBuilder::new(
            BookWeights::new()
                .with("fanduel", 0.3)
                .with("draftkings", 0.3)
                .with("betmgm", 0.3),
            2,
            0.10,
        ),
        edge: EdgeCalculator::new(0.15),
        band: EdgeBand::new(0.02, 0.20),
        sizer: KellySizer::new(0.25, Decimal::new(1000, 0), 0.01, 0.03),
    }
}

/// Scanner settings with no alert delay.
pub fn settings() -> ScannerSettings {
    ScannerSettings {
        sport: "basketball_nba".into(),
        pricing: pricing(),
        max_alerts_per_event: 10,
        alert_delay: Duration::ZERO,
        fetch_concurrency: 1,
    }
}

/// A fully populated opportunity from a Pinnacle line.
pub fn opportunity() -> Opportunity {
    Opportunity {
        event_id: EventId::from("evt-1"),
        matchup: "Miami Heat @ Boston Celtics".into(),
        market_key: "player_points".into(),
        participant: Some("Jayson Tatum".into()),
        line_value: Some(27.5),
        side: Side::Over,
        book: BookName::from("fanduel"),
        offered_price: price(120),
        fair_price: price(-105),
        fair_probability: 0.49,
        hold: 0.04,
        edge: 0.08,
        ev_pct: 8.0,
        recommended_units: 2.56,
        recommended_dollars: Decimal::new(2560, 2),
        fair_value_delta: 0.0,
        fair_source: FairSource::Sharp {
            book: BookName::from("pinnacle"),
            price: price(-115),
            opposing_price: price(-105),
            bet_limit: Some(500.0),
        },
        bet_limit: None,
        link: Some("https://book/slip".into()),
        commence_time: Some(tip_off()),
    }
}
