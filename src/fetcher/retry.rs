//! Fixed-budget retry around a [`QuoteSource`].
//!
//! Every attempt gets its own fresh deadline; deadlines never accumulate
//! across attempts. Between two attempts the fetcher waits a fixed delay.
//! There is no delay after the final attempt, so the worst-case latency is
//! `attempts * attempt_timeout + (attempts - 1) * delay`.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{Instrument, Span};

use super::QuoteSource;
use crate::domain::Quote;
use crate::error::FetchError;

/// Timing parameters of the linear retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Deadline granted to each attempt, measured from the attempt start.
    pub attempt_timeout: Duration,
    /// Fixed pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_millis(200),
            delay: Duration::from_millis(50),
        }
    }
}

/// Wraps a [`QuoteSource`] with the fixed retry policy.
#[derive(Debug)]
pub struct RetryingQuoteFetcher<S> {
    source: S,
    policy: RetryPolicy,
    span: Span,
}

impl<S: QuoteSource> RetryingQuoteFetcher<S> {
    /// Creates a retrying fetcher. Attempt failures are logged inside `span`.
    #[must_use]
    pub fn new(source: S, policy: RetryPolicy, span: Span) -> Self {
        Self {
            source,
            policy,
            span,
        }
    }

    /// Returns the wrapped source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches a quote, trying at most `max_attempts` times (at least once).
    ///
    /// Returns on the first success.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt once the budget is exhausted.
    pub async fn fetch_with_retry(&self, max_attempts: u32) -> Result<Quote, FetchError> {
        let attempts = max_attempts.max(1);

        async {
            let mut attempt = 1;
            loop {
                let deadline = Instant::now() + self.policy.attempt_timeout;
                match self.source.fetch(deadline).await {
                    Ok(quote) => {
                        tracing::debug!(attempt, bid = %quote.bid, "quote fetched");
                        return Ok(quote);
                    }
                    Err(err) if attempt < attempts => {
                        tracing::warn!(
                            attempt,
                            max_attempts = attempts,
                            error = %err,
                            "quote fetch failed, retrying"
                        );
                        tokio::time::sleep(self.policy.delay).await;
                        attempt += 1;
                    }
                    Err(err) => {
                        tracing::error!(
                            attempts,
                            error = %err,
                            "quote fetch failed, attempt budget exhausted"
                        );
                        return Err(err);
                    }
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }
}
