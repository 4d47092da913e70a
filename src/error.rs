//! Error types for the fetch, save and client paths.
//!
//! [`FetchError`] and [`SaveError`] are the two request-fatal failures on
//! the server side; both collapse into [`GatewayError`], which always maps
//! to `500 Internal Server Error` with a generic body. The cause is only
//! visible in server logs. [`ClientError`] covers the `quote-client`
//! process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure while retrieving a quote from the external provider.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The attempt deadline elapsed before a quote was decoded.
    #[error("quote provider did not answer before the deadline")]
    Timeout,

    /// Connection or protocol failure.
    #[error("quote provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("quote provider returned status {0}")]
    Status(StatusCode),

    /// The body could not be decoded as a quote map.
    #[error("quote provider body could not be decoded: {0}")]
    Decode(String),

    /// The body decoded but did not carry the expected currency pair.
    #[error("quote provider response has no `{0}` entry")]
    MissingPair(String),
}

/// Failure while persisting a quote record.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The insert did not complete before its deadline.
    #[error("quote insert did not complete before the deadline")]
    Timeout,

    /// Storage-layer failure (open, schema or insert).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Server-side request failure, rendered as a `500` response.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The retry budget was exhausted without obtaining a quote.
    #[error("failed to fetch quote: {0}")]
    Fetch(#[from] FetchError),

    /// The fetched quote could not be stored.
    #[error("failed to store quote: {0}")]
    Save(#[from] SaveError),
}

impl GatewayError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Generic message exposed to HTTP clients. It never carries the cause.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "failed to fetch quote",
            Self::Save(_) => "failed to store quote",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.public_message()).into_response()
    }
}

/// Failure of the `quote-client` process. Every variant is process-fatal.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server did not answer before the client deadline.
    #[error("quote server did not answer before the deadline")]
    Timeout,

    /// Connection or protocol failure.
    #[error("request to quote server failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-200 status.
    #[error("quote server returned status {0}")]
    Status(StatusCode),

    /// The body was not a quote.
    #[error("quote server body could not be decoded: {0}")]
    Decode(String),

    /// Writing the output file failed.
    #[error("could not write quote file: {0}")]
    Io(#[from] std::io::Error),
}
