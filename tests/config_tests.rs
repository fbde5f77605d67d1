//! Configuration file loading.

use std::io::Write;

use rust_decimal_macros::dec;
use sharpedge::error::{ConfigError, Error};
use sharpedge::infrastructure::config::settings::Config;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_full_file() {
    let file = write_config(
        r#"
[logging]
level = "debug"
format = "json"

[provider]
sport = "basketball_wnba"
markets = ["player_points", "player_rebounds"]
bookmakers = ["pinnacle", "fanduel"]
monthly_budget = 20000

[consensus]
sharp_book = "Pinnacle"
min_books = 3
max_prob_diff = 0.08

[consensus.weights]
fanduel = 0.5
draftkings = 0.25

[edge]
min_edge = 0.03
max_edge = 0.15
max_edge_calc = 0.12

[sizing]
kelly_fraction = 0.5
bankroll = 2500
max_unit_pct = 0.05

[alerts]
max_per_event = 3
delay_ms = 0

[scanner]
interval_secs = 30
fetch_concurrency = 2
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.provider.sport, "basketball_wnba");
    assert_eq!(config.provider.markets.len(), 2);
    assert_eq!(config.provider.monthly_budget, 20_000);
    assert_eq!(config.consensus.sharp_book().as_str(), "pinnacle");
    assert_eq!(config.consensus.min_books, 3);
    assert_eq!(config.sizing.bankroll, dec!(2500));
    assert_eq!(config.alerts.max_per_event, 3);

    let settings = config.scanner_settings();
    assert_eq!(settings.sport, "basketball_wnba");
    assert_eq!(settings.max_alerts_per_event, 3);
    assert_eq!(settings.fetch_concurrency, 2);
    assert!(settings.alert_delay.is_zero());
    assert_eq!(settings.pricing.band.min_edge, 0.03);
    assert_eq!(config.schedule().interval.as_secs(), 30);
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_config("");
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.provider.sport, "basketball_nba");
    assert_eq!(config.consensus.min_books, 2);
    assert_eq!(config.edge.min_edge, 0.02);
    assert_eq!(config.edge.max_edge, 0.20);
    assert_eq!(config.edge.max_edge_calc, 0.15);
    assert_eq!(config.sizing.kelly_fraction, 0.25);
    assert_eq!(config.alerts.max_per_event, 10);
    assert_eq!(config.scanner.interval_secs, 60);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn invalid_value_names_the_field() {
    let file = write_config("[sizing]\nkelly_fraction = 1.5\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "kelly_fraction",
            ..
        })
    ));
}

#[test]
fn secrets_come_from_environment() {
    std::env::set_var("DISCORD_WEBHOOK_URL", "  https://discord.test/api/webhooks/1  ");
    let file = write_config("[alerts]\nlog = false\n");
    let config = Config::load(file.path()).unwrap();
    std::env::remove_var("DISCORD_WEBHOOK_URL");

    assert_eq!(
        config.alerts.discord_webhook_url.as_deref(),
        Some("https://discord.test/api/webhooks/1")
    );
    assert!(!config.alerts.log);
}
