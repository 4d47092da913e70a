//! Persistence layer: append-only SQLite store for fetched quotes.
//!
//! A single [`SqliteQuoteStore`] is opened at startup and shared by all
//! requests. Concurrent inserts are serialized by SQLite's own locking; the
//! application adds no ordering of its own.

pub mod models;
pub mod sqlite;

pub use models::QuoteRecord;
pub use sqlite::SqliteQuoteStore;
