//! # brl-quote-gateway
//!
//! Fetches the current USD-BRL exchange rate from an external provider,
//! stores every fetched quote in SQLite and serves it over `GET /cotacao`.
//! A companion `quote-client` binary reads that endpoint under a strict
//! deadline and writes the quote to a local file.
//!
//! ## Architecture
//!
//! ```text
//! quote-client ──HTTP──┐
//!                      │
//!     REST Handlers (api/)
//!         │
//!     QuoteService (service/)
//!         ├── RetryingQuoteFetcher ── HttpQuoteFetcher ──HTTPS── provider
//!         └── SqliteQuoteStore (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod persistence;
pub mod service;
