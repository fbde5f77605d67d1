//! Handler for the `run` command.

use std::path::Path;

use tokio::sync::watch;
use tracing::info;

use super::load_config;
use crate::application::ScanRuntime;
use crate::error::Result;
use crate::infrastructure::factory::build_scanner;

/// Scan until Ctrl-C.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    config.init_logging();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scanner = build_scanner(&config)?.with_shutdown(shutdown_rx.clone());
    let runtime = ScanRuntime::new(scanner, config.schedule());

    info!(
        sport = %config.provider.sport,
        interval_secs = config.scanner.interval_secs,
        "sharpedge starting"
    );

    let run = runtime.run(shutdown_rx);
    tokio::pin!(run);
    let summary = tokio::select! {
        summary = &mut run => summary,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            run.await
        }
    };
    info!(
        cycles = summary.cycles,
        opportunities = summary.totals.opportunities_accepted,
        "sharpedge stopped"
    );
    Ok(())
}
