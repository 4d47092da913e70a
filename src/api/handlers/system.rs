//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
    stored_quotes: Option<i64>,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, current timestamp and the number of stored quotes. Reports `degraded` when the store cannot be read.",
    responses(
        (status = 200, description = "Service status", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stored_quotes = match state.quote_service.store().count().await {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!(error = %err, "health check could not read the quote store");
            None
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: if stored_quotes.is_some() {
                "healthy"
            } else {
                "degraded"
            },
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            stored_quotes,
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
