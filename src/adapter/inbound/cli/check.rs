//! Handler for the `check-config` command.

use std::path::Path;

use super::load_config;
use crate::error::Result;
use crate::infrastructure::config::provider::ODDS_API_KEY_ENV;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration and print a summary.
///
/// A missing API key is reported but is not an error here; `run` and `scan`
/// fail on it.
pub fn execute(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", summary(&config));
    Ok(())
}

fn presence(value: bool) -> &'static str {
    if value {
        "set"
    } else {
        "missing"
    }
}

/// Effective settings, one per line.
pub fn summary(config: &Config) -> String {
    let fields = [
        ("Sport", config.provider.sport.clone()),
        ("Markets", config.provider.markets.join(", ")),
        ("Books", config.provider.bookmakers.len().to_string()),
        ("Sharp book", config.consensus.sharp_book.clone()),
        (
            "Consensus",
            format!(
                "{} books, max diff {:.0}%",
                config.consensus.min_books,
                config.consensus.max_prob_diff * 100.0
            ),
        ),
        (
            "Edge band",
            format!(
                "{:.1}% - {:.1}% (cap {:.1}%)",
                config.edge.min_edge * 100.0,
                config.edge.max_edge * 100.0,
                config.edge.max_edge_calc * 100.0
            ),
        ),
        (
            "Sizing",
            format!(
                "{:.2} Kelly, bankroll ${}, {:.1}%-{:.1}% per bet",
                config.sizing.kelly_fraction,
                config.sizing.bankroll,
                config.sizing.min_unit_pct * 100.0,
                config.sizing.max_unit_pct * 100.0
            ),
        ),
        ("Interval", format!("{}s", config.scanner.interval_secs)),
        (ODDS_API_KEY_ENV, presence(config.provider.api_key.is_some()).to_string()),
        (
            "Discord webhook",
            presence(config.alerts.discord_webhook_url.is_some()).to_string(),
        ),
    ];

    let mut out = String::from("Configuration OK\n");
    for (name, value) in fields {
        out.push_str(&format!("  {name:<16} {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_shows_defaults() {
        let text = summary(&Config::default());
        assert!(text.starts_with("Configuration OK"));
        assert!(text.contains("basketball_nba"));
        assert!(text.contains("2.0% - 20.0% (cap 15.0%)"));
        assert!(text.contains("ODDS_API_KEY     missing"));
    }
}
