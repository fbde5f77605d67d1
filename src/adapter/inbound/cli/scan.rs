//! Handler for the `scan` command.

use std::path::Path;

use super::command::ScanArgs;
use super::load_config;
use crate::domain::stats::ScanReport;
use crate::error::Result;
use crate::infrastructure::factory::build_scanner;

/// Run one cycle and print the report.
pub async fn execute(config_path: &Path, args: &ScanArgs) -> Result<()> {
    let config = load_config(config_path)?;
    config.init_logging();

    let report = build_scanner(&config)?.run_scan_cycle().await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

/// Plain-text rendering of a report.
pub fn render(report: &ScanReport) -> String {
    let stats = &report.stats;
    let mut out = format!(
        "events {} (failed {}, skipped {}), outcomes {}, opportunities {}, alerts {} sent / {} failed / {} suppressed\n",
        stats.events_seen,
        stats.events_failed,
        stats.events_skipped,
        stats.outcomes_seen,
        report.opportunities.len(),
        stats.alerts_sent,
        stats.alerts_failed,
        stats.alerts_suppressed,
    );
    if stats.budget_exhausted {
        out.push_str("request budget exhausted\n");
    }
    for opportunity in &report.opportunities {
        out.push_str(&format!("  {} | {}\n", opportunity.matchup, opportunity));
    }
    out
}
