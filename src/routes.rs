//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - liveness probe (public)
//! - `/api/*`      - REST API (session cookie for mutations)
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **CORS** - configured origins with credentials
//! - **Body limit** - sized for one image upload plus multipart framing
//! - **Path normalization** - trailing slash handling

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::config::Config;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // With credentials enabled the origin list must be explicit; an empty
    // list simply allows no cross-origin callers.
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes(state.clone()))
        .with_state(state.clone())
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes + 64 * 1024))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
