//! Service layer: the per-request fetch, save and respond pipeline.

pub mod quote_service;

pub use quote_service::QuoteService;
