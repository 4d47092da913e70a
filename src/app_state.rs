//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::QuoteService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote pipeline, including the long-lived store handle.
    pub quote_service: Arc<QuoteService>,
}
