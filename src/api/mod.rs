//! REST API layer: route handlers, middleware and the OpenAPI document.

pub mod handlers;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::domain::Quote;

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "brl-quote-gateway", description = "USD-BRL quote gateway"),
    paths(handlers::quote::get_quote, handlers::system::health_handler),
    components(schemas(Quote, handlers::system::HealthResponse)),
    tags(
        (name = "Quotes", description = "Dollar quote retrieval"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the complete application: routes, tracing and the outer request
/// timeout, bound to `state`. A request cut by the outer timeout is answered
/// with `500`, like every other internal failure.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    request_timeout,
                )),
        )
        .with_state(state)
}
