//! Single-attempt HTTP fetcher for the external quote provider.

use tokio::time::Instant;

use super::QuoteSource;
use crate::domain::{Quote, USD_BRL_PAIR};
use crate::error::FetchError;

/// Issues one `GET` to the provider and extracts the `USDBRL` entry.
#[derive(Debug, Clone)]
pub struct HttpQuoteFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpQuoteFetcher {
    /// Creates a fetcher for `url` sharing the given HTTP client.
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the provider URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self) -> Result<Quote, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Quote::from_provider_body(&body, USD_BRL_PAIR)
    }
}

impl QuoteSource for HttpQuoteFetcher {
    async fn fetch(&self, deadline: Instant) -> Result<Quote, FetchError> {
        // Dropping the request future on expiry aborts the connection.
        tokio::time::timeout_at(deadline, self.request())
            .await
            .map_err(|_| FetchError::Timeout)?
    }
}
