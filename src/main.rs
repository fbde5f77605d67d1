use clap::Parser;
use sharpedge::adapter::inbound::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = cli::execute(cli).await {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
