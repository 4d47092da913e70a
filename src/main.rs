//! brl-quote-gateway server entry point.
//!
//! Opens the quote store, wires the fetch pipeline and serves `GET /cotacao`.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use brl_quote_gateway::api;
use brl_quote_gateway::app_state::AppState;
use brl_quote_gateway::config::GatewayConfig;
use brl_quote_gateway::fetcher::{HttpQuoteFetcher, RetryPolicy, RetryingQuoteFetcher};
use brl_quote_gateway::persistence::SqliteQuoteStore;
use brl_quote_gateway::service::QuoteService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config =
        GatewayConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    tracing::info!(addr = %config.listen_addr, "starting brl-quote-gateway");

    // Open the shared store once for the whole process
    let store = SqliteQuoteStore::connect(
        &config.database_url,
        config.database_max_connections,
        tracing::info_span!("quote_store"),
    )
    .await
    .with_context(|| format!("cannot open quote store at {}", config.database_url))?;

    // Build the fetch pipeline
    let http_client = reqwest::Client::builder()
        .build()
        .context("cannot build HTTP client")?;
    let fetcher = RetryingQuoteFetcher::new(
        HttpQuoteFetcher::new(http_client, config.quote_provider_url.clone()),
        RetryPolicy {
            attempt_timeout: config.fetch_attempt_timeout,
            delay: config.fetch_retry_delay,
        },
        tracing::info_span!("quote_fetcher"),
    );
    tracing::info!(
        provider = fetcher.source().url(),
        attempts = config.fetch_max_attempts,
        "quote provider configured"
    );
    let quote_service = Arc::new(QuoteService::new(
        fetcher,
        store.clone(),
        config.fetch_max_attempts,
        config.save_timeout,
        tracing::info_span!("quote_service"),
    ));

    let app = api::build_app(AppState { quote_service }, config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
