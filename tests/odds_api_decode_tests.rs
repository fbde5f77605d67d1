//! Decoding recorded Odds API responses into domain snapshots.

use sharpedge::adapter::outbound::odds_api::convert::event_snapshot;
use sharpedge::adapter::outbound::odds_api::dto::{EventDto, EventOddsDto};
use sharpedge::domain::market::{EventRef, Side};

const EVENTS: &str = r#"[
    {
        "id": "a1b2c3",
        "sport_key": "basketball_nba",
        "sport_title": "NBA",
        "commence_time": "2025-01-15T00:10:00Z",
        "home_team": "Boston Celtics",
        "away_team": "Miami Heat"
    },
    {
        "id": "d4e5f6",
        "sport_key": "basketball_nba",
        "sport_title": "NBA",
        "commence_time": "2025-01-15T02:40:00Z",
        "home_team": "Los Angeles Lakers",
        "away_team": "Denver Nuggets"
    }
]"#;

const ODDS: &str = r#"{
    "id": "a1b2c3",
    "sport_key": "basketball_nba",
    "sport_title": "NBA",
    "commence_time": "2025-01-15T00:10:00Z",
    "home_team": "Boston Celtics",
    "away_team": "Miami Heat",
    "bookmakers": [
        {
            "key": "pinnacle",
            "title": "Pinnacle",
            "last_update": "2025-01-14T22:01:12Z",
            "markets": [
                {
                    "key": "player_points",
                    "last_update": "2025-01-14T22:01:12Z",
                    "outcomes": [
                        {"name": "Over", "description": "Jayson Tatum", "price": -118, "point": 27.5, "bet_limit": 750},
                        {"name": "Under", "description": "Jayson Tatum", "price": -102, "point": 27.5, "bet_limit": 750},
                        {"name": "Over", "description": "Jimmy Butler", "price": -105, "point": 20.5},
                        {"name": "Under", "description": "Jimmy Butler", "price": -115, "point": 20.5}
                    ]
                }
            ]
        },
        {
            "key": "draftkings",
            "title": "DraftKings",
            "markets": [
                {
                    "key": "player_points",
                    "outcomes": [
                        {"name": "Over", "description": "Jayson Tatum", "price": 110, "point": 27.5,
                         "links": {"us": "https://sportsbook.draftkings.com/slip/1"}},
                        {"name": "Under", "description": "Jayson Tatum", "price": -140, "point": 27.5}
                    ]
                },
                {
                    "key": "player_rebounds",
                    "outcomes": [
                        {"name": "Over", "description": "Bam Adebayo", "price": -120, "point": 9.5},
                        {"name": "Under", "description": "Bam Adebayo", "price": -110, "point": 9.5}
                    ]
                }
            ]
        }
    ]
}"#;

#[test]
fn decodes_event_listing() {
    let events: Vec<EventDto> = serde_json::from_str(EVENTS).unwrap();
    let events: Vec<EventRef> = events.into_iter().map(EventRef::from).collect();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id.as_str(), "a1b2c3");
    assert_eq!(events[1].matchup(), "Denver Nuggets @ Los Angeles Lakers");
    assert!(events[0].commence_time.is_some());
}

#[test]
fn groups_books_into_markets() {
    let dto: EventOddsDto = serde_json::from_str(ODDS).unwrap();
    let snapshot = event_snapshot(dto);

    assert_eq!(snapshot.event.home_team, "Boston Celtics");
    assert_eq!(snapshot.markets.len(), 3);

    let tatum = snapshot
        .markets
        .iter()
        .find(|m| m.participant.as_deref() == Some("Jayson Tatum"))
        .unwrap();
    assert_eq!(tatum.line_value, Some(27.5));
    assert_eq!(tatum.books().len(), 2);
    assert_eq!(tatum.sides(), Some([Side::Over, Side::Under]));

    let dk_over = tatum.quote(&"draftkings".into(), Side::Over).unwrap();
    assert_eq!(dk_over.price.value(), 110);
    assert_eq!(
        dk_over.link.as_deref(),
        Some("https://sportsbook.draftkings.com/slip/1")
    );

    let pin_under = tatum.quote(&"pinnacle".into(), Side::Under).unwrap();
    assert_eq!(pin_under.bet_limit, Some(750.0));
}

#[test]
fn empty_bookmakers_yield_no_markets() {
    let json = r#"{
        "id": "x", "sport_key": "basketball_nba",
        "home_team": "Boston Celtics", "away_team": "Miami Heat",
        "bookmakers": []
    }"#;
    let snapshot = event_snapshot(serde_json::from_str(json).unwrap());
    assert!(snapshot.markets.is_empty());
    assert!(snapshot.event.commence_time.is_none());
}
