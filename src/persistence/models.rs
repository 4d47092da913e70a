//! Database models for stored quotes.

use serde::{Deserialize, Serialize};

/// A row of the `cotacoes` table.
///
/// Rows are only ever inserted. `timestamp` is the wall-clock time of the
/// insert in unix seconds, not the time the quote was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// Bid exactly as received from the provider.
    pub bid: String,
    /// Save time, unix seconds.
    pub timestamp: i64,
}
