//! End-to-end scan cycle scenarios against a scripted provider.

use std::sync::Arc;

use rust_decimal_macros::dec;
use sharpedge::application::{Scanner, ScannerSettings};
use sharpedge::domain::history::EventHistory;
use sharpedge::domain::market::{BookQuote, Side};
use sharpedge::domain::opportunity::FairSource;
use sharpedge::port::AlertSender;
use sharpedge::testkit::alert::{FailingAlertSender, RecordingAlertSender};
use sharpedge::testkit::domain::{
    consensus_market, event, price, settings, sharp_market, sharp_snapshot, snapshot, thin_market,
};
use sharpedge::testkit::provider::StaticProvider;
use tokio::sync::watch;

fn scanner_with(
    provider: StaticProvider,
    alerts: Arc<dyn AlertSender>,
    settings: ScannerSettings,
) -> Scanner {
    Scanner::new(
        Arc::new(provider),
        alerts,
        Arc::new(EventHistory::new()),
        settings,
    )
}

fn recording_scanner(provider: StaticProvider) -> (Scanner, RecordingAlertSender) {
    let alerts = RecordingAlertSender::new();
    let scanner = scanner_with(provider, Arc::new(alerts.clone()), settings());
    (scanner, alerts)
}

#[tokio::test]
async fn sharp_line_flags_soft_book_over() {
    let provider = StaticProvider::new().with_snapshot(snapshot(
        "e1",
        vec![sharp_market("e1", "Jimmy Butler")],
    ));
    let (scanner, alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;
    let stats = &report.stats;

    assert_eq!(stats.events_seen, 1);
    assert_eq!(stats.outcomes_seen, 2);
    assert_eq!(stats.fair_from_sharp, 2);
    assert_eq!(stats.quotes_compared, 2);
    assert_eq!(stats.positive_edges, 1);
    assert_eq!(stats.opportunities_accepted, 1);
    assert_eq!(stats.alerts_sent, 1);
    assert_eq!(stats.errors, 0);

    let opp = &report.opportunities[0];
    assert_eq!(opp.book.as_str(), "fanduel");
    assert_eq!(opp.side, Side::Over);
    assert_eq!(opp.offered_price, price(115));
    assert_eq!(opp.fair_price, price(-100));
    assert!((opp.edge - 0.075).abs() < 1e-9);
    assert!((opp.recommended_units - 3.0).abs() < 1e-9);
    assert_eq!(opp.recommended_dollars, dec!(30));
    assert_eq!(opp.fair_value_delta, 0.0);
    assert_eq!(opp.link.as_deref(), Some("https://fanduel/slip"));
    assert!(opp.commence_time.is_some());
    assert!(matches!(
        opp.fair_source,
        FairSource::Sharp { bet_limit: Some(limit), .. } if limit == 500.0
    ));

    assert_eq!(alerts.sent(), report.opportunities);
}

#[tokio::test]
async fn consensus_used_without_sharp_book() {
    let provider = StaticProvider::new().with_snapshot(snapshot(
        "e1",
        vec![consensus_market("e1", "Bam Adebayo")],
    ));
    let (scanner, _alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;
    let stats = &report.stats;

    assert_eq!(stats.fair_from_consensus, 2);
    assert_eq!(stats.fair_from_sharp, 0);
    assert_eq!(stats.quotes_compared, 5);
    assert_eq!(report.opportunities.len(), 1);

    let opp = &report.opportunities[0];
    assert_eq!(opp.book.as_str(), "betrivers");
    assert_eq!(
        opp.fair_source,
        FairSource::Consensus {
            books: 2,
            price: price(-110),
            opposing_price: price(-110),
        }
    );
}

#[tokio::test]
async fn single_book_market_is_unavailable() {
    let provider = StaticProvider::new().with_snapshot(snapshot(
        "e1",
        vec![thin_market("e1", "Tyler Herro")],
    ));
    let (scanner, alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;
    let stats = &report.stats;

    assert_eq!(stats.outcomes_seen, 2);
    assert_eq!(stats.outcomes_unavailable, 2);
    assert_eq!(stats.insufficient_books, 2);
    assert_eq!(stats.quotes_compared, 0);
    assert!(report.opportunities.is_empty());
    assert_eq!(alerts.count(), 0);
}

#[tokio::test]
async fn alert_cap_suppresses_but_reports() {
    let provider = StaticProvider::new().with_snapshot(sharp_snapshot("e1", 3));
    let alerts = RecordingAlertSender::new();
    let settings = ScannerSettings {
        max_alerts_per_event: 2,
        ..settings()
    };
    let scanner = scanner_with(provider, Arc::new(alerts.clone()), settings);

    let report = scanner.run_scan_cycle().await;

    assert_eq!(report.stats.opportunities_accepted, 3);
    assert_eq!(report.stats.alerts_sent, 2);
    assert_eq!(report.stats.alerts_suppressed, 1);
    assert_eq!(report.opportunities.len(), 3);
    assert_eq!(alerts.count(), 2);
}

#[tokio::test]
async fn alert_cap_is_per_event() {
    let provider = StaticProvider::new()
        .with_snapshot(sharp_snapshot("e1", 2))
        .with_snapshot(sharp_snapshot("e2", 2));
    let alerts = RecordingAlertSender::new();
    let settings = ScannerSettings {
        max_alerts_per_event: 1,
        ..settings()
    };
    let scanner = scanner_with(provider, Arc::new(alerts.clone()), settings);

    let report = scanner.run_scan_cycle().await;

    assert_eq!(report.stats.alerts_sent, 2);
    assert_eq!(report.stats.alerts_suppressed, 2);
}

#[tokio::test]
async fn failed_event_does_not_stop_cycle() {
    let provider = StaticProvider::new()
        .with_snapshot(sharp_snapshot("e1", 1))
        .with_failing_event(event("e2"), 500)
        .with_snapshot(sharp_snapshot("e3", 1));
    let (scanner, alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;

    assert_eq!(report.stats.events_seen, 2);
    assert_eq!(report.stats.events_failed, 1);
    assert_eq!(report.stats.errors, 1);
    assert!(!report.stats.budget_exhausted);
    assert_eq!(alerts.count(), 2);
}

#[tokio::test]
async fn failed_alert_is_counted_and_reported() {
    let provider = StaticProvider::new().with_snapshot(sharp_snapshot("e1", 1));
    let alerts = FailingAlertSender::new();
    let scanner = scanner_with(provider, Arc::new(alerts.clone()), settings());

    let report = scanner.run_scan_cycle().await;

    assert_eq!(alerts.attempts(), 1);
    assert_eq!(report.stats.alerts_sent, 0);
    assert_eq!(report.stats.alerts_failed, 1);
    assert_eq!(report.stats.errors, 1);
    assert_eq!(report.opportunities.len(), 1);
}

#[tokio::test]
async fn event_listing_failure_ends_cycle() {
    let provider = StaticProvider::new()
        .with_snapshot(sharp_snapshot("e1", 1))
        .with_events_error(503);
    let (scanner, alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;

    assert_eq!(report.stats.events_seen, 0);
    assert_eq!(report.stats.errors, 1);
    assert!(!report.stats.budget_exhausted);
    assert_eq!(alerts.count(), 0);
}

#[tokio::test]
async fn budget_running_out_skips_remaining_events() {
    let provider = StaticProvider::new()
        .with_snapshot(sharp_snapshot("e1", 1))
        .with_snapshot(sharp_snapshot("e2", 1))
        .with_snapshot(sharp_snapshot("e3", 1))
        .with_budget(2);
    let (_, snapshot_calls) = provider.counts();
    let (scanner, alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;

    assert!(report.stats.budget_exhausted);
    assert_eq!(report.stats.events_seen, 1);
    assert_eq!(report.stats.events_skipped, 2);
    assert_eq!(snapshot_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(alerts.count(), 1);
}

#[tokio::test]
async fn spent_budget_skips_the_cycle() {
    let provider = StaticProvider::new()
        .with_snapshot(sharp_snapshot("e1", 1))
        .with_budget(0);
    let (event_calls, _) = provider.counts();
    let (scanner, _alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;

    assert!(report.stats.budget_exhausted);
    assert_eq!(report.stats.events_seen, 0);
    assert_eq!(event_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_refusal_marks_budget_exhausted() {
    let provider = StaticProvider::new()
        .with_exhausted_event(event("e1"))
        .with_snapshot(sharp_snapshot("e2", 1));
    let (scanner, alerts) = recording_scanner(provider);

    let report = scanner.run_scan_cycle().await;

    assert!(report.stats.budget_exhausted);
    assert_eq!(report.stats.events_skipped, 2);
    assert_eq!(report.stats.events_failed, 0);
    assert_eq!(alerts.count(), 0);
}

#[tokio::test]
async fn repeated_scan_reports_zero_drift() {
    let provider = StaticProvider::new().with_snapshot(sharp_snapshot("e1", 2));
    let (scanner, alerts) = recording_scanner(provider);

    let first = scanner.run_scan_cycle().await;
    let second = scanner.run_scan_cycle().await;

    assert_eq!(first.opportunities.len(), second.opportunities.len());
    assert!(second
        .opportunities
        .iter()
        .all(|opp| opp.fair_value_delta == 0.0));
    assert_eq!(
        scanner.history().outcome_count(&"e1".into()),
        4,
        "two players, two sides each"
    );
    assert_eq!(alerts.count(), 4);
}

#[tokio::test]
async fn moved_sharp_line_reports_drift() {
    let history = Arc::new(EventHistory::new());
    let alerts: Arc<dyn AlertSender> = Arc::new(RecordingAlertSender::new());

    let before = StaticProvider::new().with_snapshot(snapshot(
        "e1",
        vec![sharp_market("e1", "Jimmy Butler")],
    ));
    let moved = {
        let mut market = sharp_market("e1", "Jimmy Butler");
        market.quotes.retain(|q| q.book.as_str() != "pinnacle");
        let market = market
            .with_quote(BookQuote::new("pinnacle", Side::Over, price(-130)))
            .with_quote(BookQuote::new("pinnacle", Side::Under, price(110)));
        StaticProvider::new().with_snapshot(snapshot("e1", vec![market]))
    };

    let first = Scanner::new(
        Arc::new(before),
        Arc::clone(&alerts),
        Arc::clone(&history),
        settings(),
    );
    let second = Scanner::new(Arc::new(moved), alerts, Arc::clone(&history), settings());

    first.run_scan_cycle().await;
    let report = second.run_scan_cycle().await;

    let opp = &report.opportunities[0];
    assert!(opp.fair_value_delta < -15.0);
    assert!((opp.edge - 0.15).abs() < 1e-9, "edge is capped");
}

#[tokio::test]
async fn shutdown_skips_unprocessed_events() {
    let provider = StaticProvider::new()
        .with_snapshot(sharp_snapshot("e1", 1))
        .with_snapshot(sharp_snapshot("e2", 1))
        .with_snapshot(sharp_snapshot("e3", 1));
    let (tx, rx) = watch::channel(false);
    let (scanner, alerts) = recording_scanner(provider);
    let scanner = scanner.with_shutdown(rx);

    tx.send(true).unwrap();
    let report = scanner.run_scan_cycle().await;

    assert_eq!(report.stats.events_seen, 0);
    assert_eq!(report.stats.events_skipped, 3);
    assert_eq!(alerts.count(), 0);
}

#[tokio::test]
async fn concurrent_fetches_keep_event_order() {
    let mut provider = StaticProvider::new();
    for id in ["e1", "e2", "e3", "e4", "e5"] {
        provider = provider.with_snapshot(sharp_snapshot(id, 1));
    }
    let alerts = RecordingAlertSender::new();
    let settings = ScannerSettings {
        fetch_concurrency: 4,
        ..settings()
    };
    let scanner = scanner_with(provider, Arc::new(alerts.clone()), settings);

    let report = scanner.run_scan_cycle().await;

    let ids: Vec<_> = report
        .opportunities
        .iter()
        .map(|opp| opp.event_id.as_str().to_string())
        .collect();
    assert_eq!(ids, ["e1", "e2", "e3", "e4", "e5"]);
    assert_eq!(report.stats.events_seen, 5);
}
