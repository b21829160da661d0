//! Route definitions for the LSD HTTP surface.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(license_routes())
        .merge(compliance_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::compliance::compliance_audit,
        ))
        .with_state(state)
}

/// Status-document and loan-action endpoints.
fn license_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/licenses/",
            post(handlers::status::create).get(handlers::listing::filter_statuses),
        )
        .route(
            "/licenses/:key/status",
            get(handlers::status::get_status).patch(handlers::status::cancel),
        )
        .route("/licenses/:key/register", post(handlers::lending::register))
        .route(
            "/licenses/:key/return",
            put(handlers::lending::lending_return),
        )
        .route("/licenses/:key/renew", put(handlers::lending::renew))
        .route(
            "/licenses/:key/registered",
            get(handlers::listing::registered_devices),
        )
}

/// Conformance tooling control endpoint.
fn compliance_routes() -> Router<AppState> {
    Router::new().route("/compliancetest", post(handlers::compliance::set_stage))
}

/// Health check endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
