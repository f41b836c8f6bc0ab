//! P2P donations platform client — entry point.
//!
//! Parses the command line, loads configuration from the environment, and
//! runs the selected flow against the configured backend. All state beyond
//! the signed-in identity triple lives server-side; each invocation is a
//! single request/response exchange (plus the re-fetches the flows
//! perform) with no retries and no client-side cache.

mod api;
mod cli;
mod config;
mod donate;
mod errors;
mod register;
mod review;
mod session;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Config;
use session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Outbound calls carry no timeout; a hung backend hangs the command.
    let http = reqwest::Client::builder().build()?;
    let backend = api::Backend::new(http, &config);
    let store = SessionStore::new(&config.session_file);

    cli::run(cli.command, &backend, &store).await?;
    Ok(())
}
