//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_code}` - Short link redirect (public)
//! - `GET  /health`       - Health check (public)
//! - `/api/*`             - Link management API (Bearer token, optional on create)
//!
//! Static routes win over the `/{short_code}` capture, so `health` can never
//! be shadowed by a short code.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Optional Bearer token resolved to a requester
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Redirect and health routes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
}

/// Link management routes with authentication applied.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    api::routes::link_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = api_routes(&state).layer(rate_limit::secure_layer(behind_proxy));
    let public_router = public_routes().layer(rate_limit::layer(behind_proxy));

    let router = Router::new()
        .merge(public_router)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
