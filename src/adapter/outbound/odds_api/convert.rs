//! DTO to domain conversion.
//!
//! Outcomes from every bookmaker are grouped into two-way markets keyed by
//! (market, participant, line). Game-market lines are normalized to the home
//! side so both halves of a spread land in the same group.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::dto::{EventDto, EventOddsDto, OutcomeDto};
use crate::domain::id::EventId;
use crate::domain::market::{BookQuote, EventRef, EventSnapshot, MarketSnapshot, Side};
use crate::domain::odds::Price;

impl From<EventDto> for EventRef {
    fn from(dto: EventDto) -> Self {
        Self {
            id: EventId::new(dto.id),
            sport_key: dto.sport_key,
            home_team: dto.home_team,
            away_team: dto.away_team,
            commence_time: dto.commence_time,
        }
    }
}

type GroupKey = (String, Option<String>, Option<u64>);

fn side_of(outcome: &OutcomeDto, home_team: &str, away_team: &str) -> Option<Side> {
    match outcome.name.as_str() {
        "Over" => Some(Side::Over),
        "Under" => Some(Side::Under),
        name if name == home_team => Some(Side::Home),
        name if name == away_team => Some(Side::Away),
        _ => None,
    }
}

/// Line as seen from the primary side.
fn group_line(side: Side, point: Option<f64>) -> Option<f64> {
    point.map(|p| if side == Side::Away { -p } else { p })
}

fn price_of(outcome: &OutcomeDto) -> Option<Price> {
    if !outcome.price.is_finite() {
        return None;
    }
    Price::new(outcome.price.round() as i32).ok()
}

/// Group an event odds response into per-market snapshots.
///
/// Quotes with an unusable price are dropped individually. Outcomes that are
/// not part of a two-way market (draws, yes/no props) are skipped.
#[must_use]
pub fn event_snapshot(dto: EventOddsDto) -> EventSnapshot {
    let event = EventRef {
        id: EventId::new(dto.id),
        sport_key: dto.sport_key,
        home_team: dto.home_team,
        away_team: dto.away_team,
        commence_time: dto.commence_time,
    };

    let mut markets: Vec<MarketSnapshot> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for bookmaker in &dto.bookmakers {
        for market in &bookmaker.markets {
            for outcome in &market.outcomes {
                let Some(side) = side_of(outcome, &event.home_team, &event.away_team) else {
                    debug!(
                        book = %bookmaker.key,
                        market = %market.key,
                        outcome = %outcome.name,
                        "Skipping non two-way outcome"
                    );
                    continue;
                };
                let Some(price) = price_of(outcome) else {
                    warn!(
                        event_id = %event.id,
                        book = %bookmaker.key,
                        market = %market.key,
                        price = outcome.price,
                        "Dropping quote with invalid price"
                    );
                    continue;
                };

                let line = group_line(side, outcome.point);
                let key = (
                    market.key.clone(),
                    outcome.description.clone(),
                    line.map(f64::to_bits),
                );
                let slot = *index.entry(key).or_insert_with(|| {
                    let mut snapshot = MarketSnapshot::new(event.id.clone(), market.key.as_str());
                    snapshot.participant = outcome.description.clone();
                    snapshot.line_value = line;
                    snapshot.commence_time = event.commence_time;
                    markets.push(snapshot);
                    markets.len() - 1
                });

                let snapshot = &mut markets[slot];
                let mut quote = BookQuote::new(bookmaker.key.as_str(), side, price);
                if snapshot.quote(&quote.book, side).is_some() {
                    debug!(book = %quote.book, market = %market.key, "Duplicate quote ignored");
                    continue;
                }
                quote.bet_limit = outcome.bet_limit;
                quote.link = outcome.deep_link();
                snapshot.quotes.push(quote);
            }
        }
    }

    EventSnapshot { event, markets }
}
