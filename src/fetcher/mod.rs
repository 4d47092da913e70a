//! Outbound quote retrieval.
//!
//! [`QuoteSource`] is the seam between the request pipeline and the
//! provider: [`HttpQuoteFetcher`] issues one bounded call per invocation and
//! [`RetryingQuoteFetcher`] drives any source under a fixed attempt budget.

pub mod http;
pub mod retry;

use std::future::Future;

use tokio::time::Instant;

use crate::domain::Quote;
use crate::error::FetchError;

pub use http::HttpQuoteFetcher;
pub use retry::{RetryPolicy, RetryingQuoteFetcher};

/// Something that can produce one quote before a deadline.
pub trait QuoteSource: Send + Sync {
    /// Performs a single attempt that must finish before `deadline`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on network, decoding or deadline failure.
    fn fetch(&self, deadline: Instant) -> impl Future<Output = Result<Quote, FetchError>> + Send;
}
