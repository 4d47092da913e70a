//! Quote endpoint: fetch, persist and return the current USD-BRL bid.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Quote;
use crate::error::GatewayError;

/// `GET /cotacao` — Current dollar quote.
///
/// # Errors
///
/// Returns [`GatewayError`] (always `500`) if the quote cannot be fetched
/// within the retry budget or cannot be stored.
#[utoipa::path(
    get,
    path = "/cotacao",
    tag = "Quotes",
    summary = "Current USD-BRL quote",
    description = "Fetches the current bid from the quote provider (up to 3 attempts of 200 ms each), stores it and returns it.",
    responses(
        (status = 200, description = "Quote fetched and stored", body = Quote),
        (status = 500, description = "Quote could not be fetched or stored", body = String, content_type = "text/plain"),
    )
)]
pub async fn get_quote(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let quote = state.quote_service.fetch_and_store().await?;
    Ok(Json(quote))
}

/// Quote routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/cotacao", get(get_quote))
}
