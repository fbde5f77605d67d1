//! Alert rendering.
//!
//! Builds the Discord webhook payload for an opportunity. The embed layout is
//! fixed: title, matchup, game time, EV details, odds info, fair source and
//! an optional bet link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::opportunity::{FairSource, Opportunity};

/// Embed sidebar color for +EV alerts.
pub const POSITIVE_EV_COLOR: u32 = 0x2E_CC71;

const FOOTER: &str = "sharpedge";

/// Body of a webhook `POST`.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: String, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Title line, e.g. `FANDUEL Jayson Tatum Points Over 27.5`.
#[must_use]
pub fn title(opportunity: &Opportunity) -> String {
    format!(
        "{} {}",
        opportunity.book.to_string().to_uppercase(),
        opportunity.describe()
    )
}

/// Game start in long form, e.g. `Wednesday, January 15, 2025 12:10 AM UTC`.
#[must_use]
pub fn game_time(commence_time: DateTime<Utc>) -> String {
    commence_time.format("%A, %B %d, %Y %I:%M %p UTC").to_string()
}

fn ev_details(opportunity: &Opportunity) -> String {
    format!(
        "Edge: {:.2}%\nEV: {:.2}%\nKelly: {:.2}u\nBet: ${:.2}",
        opportunity.edge * 100.0,
        opportunity.ev_pct,
        opportunity.recommended_units,
        opportunity.recommended_dollars
    )
}

fn odds_info(opportunity: &Opportunity) -> String {
    format!(
        "Current: {}\nFV: {}\nFV Δ: {:+.2}%",
        opportunity.offered_price, opportunity.fair_price, opportunity.fair_value_delta
    )
}

fn source_of_truth(opportunity: &Opportunity) -> String {
    let mut lines = Vec::with_capacity(3);
    match &opportunity.fair_source {
        FairSource::Sharp {
            book,
            price,
            opposing_price,
            bet_limit,
        } => {
            lines.push(format!("{} {price}/{opposing_price}", capitalize(book.as_str())));
            lines.push(format!("Hold: {:.2}%", opportunity.hold * 100.0));
            if let Some(limit) = bet_limit {
                lines.push(format!("Limit: ${limit:.0}"));
            }
        }
        FairSource::Consensus {
            books,
            price,
            opposing_price,
        } => {
            lines.push(format!("Consensus ({books} books) {price}/{opposing_price}"));
            lines.push(format!("Hold: {:.2}%", opportunity.hold * 100.0));
        }
    }
    lines.join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Embed fields in display order.
#[must_use]
pub fn fields(opportunity: &Opportunity) -> Vec<EmbedField> {
    let mut fields = Vec::with_capacity(5);
    if let Some(start) = opportunity.commence_time {
        fields.push(EmbedField::new("Game Time", game_time(start), false));
    }
    fields.push(EmbedField::new("EV Details", ev_details(opportunity), true));
    fields.push(EmbedField::new("Odds Info", odds_info(opportunity), true));
    fields.push(EmbedField::new(
        "Source of Truth",
        source_of_truth(opportunity),
        false,
    ));
    if let Some(link) = &opportunity.link {
        fields.push(EmbedField::new(
            "Bet Links",
            format!("[Bet Link]({link})"),
            false,
        ));
    }
    fields
}

/// Build the embed for an opportunity, stamped at `now`.
#[must_use]
pub fn embed(opportunity: &Opportunity, now: DateTime<Utc>) -> Embed {
    Embed {
        title: title(opportunity),
        description: opportunity.matchup.clone(),
        color: POSITIVE_EV_COLOR,
        fields: fields(opportunity),
        footer: EmbedFooter {
            text: FOOTER.to_string(),
        },
        timestamp: now,
    }
}

/// Wrap an opportunity in a single-embed webhook payload.
#[must_use]
pub fn webhook_payload(opportunity: &Opportunity, username: Option<&str>) -> WebhookPayload {
    WebhookPayload {
        username: username.map(str::to_string),
        embeds: vec![embed(opportunity, Utc::now())],
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::testkit::domain::opportunity;

    #[test]
    fn test_title_uppercases_book() {
        let opp = opportunity();
        assert_eq!(title(&opp), "FANDUEL Jayson Tatum Points Over 27.5");
    }

    #[test]
    fn test_field_order_and_values() {
        let opp = opportunity();
        let fields = fields(&opp);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["Game Time", "EV Details", "Odds Info", "Source of Truth", "Bet Links"]
        );
        assert_eq!(
            fields[1].value,
            "Edge: 8.00%\nEV: 8.00%\nKelly: 2.56u\nBet: $25.60"
        );
        assert_eq!(fields[2].value, "Current: +120\nFV: -105\nFV Δ: +0.00%");
        assert_eq!(
            fields[3].value,
            "Pinnacle -115/-105\nHold: 4.00%\nLimit: $500"
        );
        assert_eq!(fields[4].value, "[Bet Link](https://book/slip)");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut opp = opportunity();
        opp.commence_time = None;
        opp.link = None;
        let names: Vec<_> = fields(&opp).into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["EV Details", "Odds Info", "Source of Truth"]);
    }

    #[test]
    fn test_consensus_source() {
        let mut opp = opportunity();
        opp.fair_source = FairSource::Consensus {
            books: 3,
            price: crate::domain::odds::Price::new(-112).unwrap(),
            opposing_price: crate::domain::odds::Price::new(-108).unwrap(),
        };
        let source = &fields(&opp)[3];
        assert!(source.value.starts_with("Consensus (3 books) -112/-108"));
    }

    #[test]
    fn test_game_time_format() {
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 0, 10, 0).unwrap();
        assert_eq!(game_time(start), "Wednesday, January 15, 2025 12:10 AM UTC");
    }

    #[test]
    fn test_payload_serializes_embed() {
        let payload = webhook_payload(&opportunity(), Some("sharpedge"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["username"], "sharpedge");
        assert_eq!(json["embeds"][0]["description"], "Miami Heat @ Boston Celtics");
        assert_eq!(json["embeds"][0]["color"], POSITIVE_EV_COLOR);
        assert_eq!(json["embeds"][0]["fields"][1]["inline"], true);
    }
}
