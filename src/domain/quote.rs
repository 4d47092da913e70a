//! The quote value exchanged between provider, store, server and client.
//!
//! The bid is kept as the provider's decimal string end to end. It is never
//! parsed into a float, so the stored and served value is byte-identical to
//! what the provider sent.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FetchError;

/// Key of the dollar/real entry in the provider's response map.
pub const USD_BRL_PAIR: &str = "USDBRL";

/// A single exchange-rate observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    /// Bid price as a decimal string, e.g. `"5.4312"`.
    #[schema(example = "5.4312")]
    pub bid: String,
}

impl Quote {
    /// Creates a quote from its bid string.
    #[must_use]
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }

    /// Extracts the quote stored under `pair` from a provider body shaped as
    /// `{"<PAIR>": {"bid": "...", ...}}`. Other fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] if the body is not such a map and
    /// [`FetchError::MissingPair`] if `pair` is absent.
    pub fn from_provider_body(body: &[u8], pair: &str) -> Result<Self, FetchError> {
        let mut quotes: HashMap<String, Self> =
            serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
        quotes
            .remove(pair)
            .ok_or_else(|| FetchError::MissingPair(pair.to_string()))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bid)
    }
}
