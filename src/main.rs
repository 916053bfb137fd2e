// nota - human-friendly command line client for the Notion API.
// Names and slash-paths resolve to object ids through a local cache.

mod cache;
mod cli;
mod error;
mod notion;
mod resolver;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = cli::Cli::parse();
    if let Err(err) = cli::run(cli).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
