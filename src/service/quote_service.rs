//! Quote service: fetch with retry, then persist, strictly in sequence.

use std::time::Duration;

use chrono::Utc;
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::domain::Quote;
use crate::error::GatewayError;
use crate::fetcher::{HttpQuoteFetcher, QuoteSource, RetryingQuoteFetcher};
use crate::persistence::SqliteQuoteStore;

/// Orchestrates one quote request.
///
/// Every call runs `Fetching -> Saving -> Responding`; a failure in either
/// of the first two stages ends the request. There is no retry at this
/// level and no state shared between calls other than the store handle.
#[derive(Debug)]
pub struct QuoteService<S = HttpQuoteFetcher> {
    fetcher: RetryingQuoteFetcher<S>,
    store: SqliteQuoteStore,
    max_attempts: u32,
    save_timeout: Duration,
    span: Span,
}

impl<S: QuoteSource> QuoteService<S> {
    /// Creates a new `QuoteService`.
    #[must_use]
    pub fn new(
        fetcher: RetryingQuoteFetcher<S>,
        store: SqliteQuoteStore,
        max_attempts: u32,
        save_timeout: Duration,
        span: Span,
    ) -> Self {
        Self {
            fetcher,
            store,
            max_attempts,
            save_timeout,
            span,
        }
    }

    /// Returns the shared quote store.
    #[must_use]
    pub fn store(&self) -> &SqliteQuoteStore {
        &self.store
    }

    /// Fetches the current quote and stores it, returning the quote to serve.
    ///
    /// Exactly one row is written per successful call and none when the
    /// fetch fails.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Fetch`] once the retry budget is exhausted and
    /// [`GatewayError::Save`] if the insert fails or misses its deadline.
    pub async fn fetch_and_store(&self) -> Result<Quote, GatewayError> {
        let request_span =
            tracing::info_span!(parent: &self.span, "quote_request", request_id = %Uuid::new_v4());

        async {
            let quote = self
                .fetcher
                .fetch_with_retry(self.max_attempts)
                .await
                .inspect_err(|err| tracing::error!(error = %err, "could not obtain quote"))?;

            let record = self
                .store
                .save(&quote, Utc::now().timestamp(), self.save_timeout)
                .await
                .inspect_err(|err| {
                    tracing::error!(error = %err, bid = %quote.bid, "could not store quote");
                })?;

            tracing::info!(id = record.id, bid = %record.bid, "quote stored");
            Ok::<_, GatewayError>(quote)
        }
        .instrument(request_span)
        .await
    }
}
