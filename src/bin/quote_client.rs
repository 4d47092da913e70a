//! quote-client entry point.
//!
//! Asks the local gateway for the current dollar quote once, under a 300 ms
//! deadline, and writes `Dólar: <bid>` to `cotacao.txt`. Exits non-zero
//! without writing anything on any failure.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use brl_quote_gateway::client::ClientFetcher;
use brl_quote_gateway::config::ClientConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env();
    let http_client = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "cannot build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let fetcher = ClientFetcher::new(http_client, config, tracing::info_span!("quote_client"));
    match fetcher.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "could not retrieve quote");
            ExitCode::FAILURE
        }
    }
}
