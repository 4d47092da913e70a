//! Client side: one bounded request to the quote server, written to a file.
//!
//! The client never retries. Any failure ends the run before the output
//! file is touched, so a failed run leaves no partial file behind.

use std::path::Path;

use tracing::{Instrument, Span};

use crate::config::ClientConfig;
use crate::domain::Quote;
use crate::error::ClientError;

/// Formats a quote the way it is written to the output file.
#[must_use]
pub fn display_line(quote: &Quote) -> String {
    format!("Dólar: {}", quote.bid)
}

/// Single-shot fetcher for the `/cotacao` endpoint.
#[derive(Debug, Clone)]
pub struct ClientFetcher {
    client: reqwest::Client,
    config: ClientConfig,
    span: Span,
}

impl ClientFetcher {
    /// Creates a client fetcher. Outcomes are logged inside `span`.
    #[must_use]
    pub fn new(client: reqwest::Client, config: ClientConfig, span: Span) -> Self {
        Self {
            client,
            config,
            span,
        }
    }

    /// Performs the single request, bounded by the configured deadline.
    ///
    /// The deadline covers connecting, the response status and the body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Timeout`] when the deadline elapses,
    /// [`ClientError::Status`] on any non-200 status,
    /// [`ClientError::Decode`] when the body is not a quote and
    /// [`ClientError::Transport`] on connection failure.
    pub async fn fetch_quote(&self) -> Result<Quote, ClientError> {
        tokio::time::timeout(self.config.timeout, self.request())
            .await
            .map_err(|_| ClientError::Timeout)?
    }

    async fn request(&self) -> Result<Quote, ClientError> {
        let response = self.client.get(&self.config.server_url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Fetches the quote and writes `Dólar: <bid>` to the output file,
    /// replacing previous content. Returns the written line.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failing step; the file is not
    /// written unless the fetch succeeded.
    pub async fn run(&self) -> Result<String, ClientError> {
        async {
            let quote = self.fetch_quote().await?;
            let line = display_line(&quote);
            write_quote_file(&self.config.output_path, &line).await?;

            tracing::info!(path = %self.config.output_path.display(), %line, "quote saved");
            Ok::<_, ClientError>(line)
        }
        .instrument(self.span.clone())
        .await
    }
}

async fn write_quote_file(path: &Path, line: &str) -> Result<(), ClientError> {
    tokio::fs::write(path, line).await?;
    Ok(())
}
