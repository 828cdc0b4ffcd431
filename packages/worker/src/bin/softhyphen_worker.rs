//! CLI entry point for the worker.

use softhyphen_worker::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Stdout carries the message protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
