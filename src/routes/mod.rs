//! HTTP route handlers.
//!
//! Both routes answer with `Cache-Control: no-store`. The cross-origin policy and
//! request tracing are applied router-wide, so unknown routes and CORS preflight
//! requests get them too.

pub mod coach;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{AppConfig, CACHE_CONTROL_NO_STORE};
use crate::error::AppError;
use crate::middleware::{cors_layer, request_id_layer};

/// Creates the Axum router with all routes and middleware.
pub fn create_router(config: &AppConfig) -> Router {
    let api_routes = Router::new()
        .route("/healthz", get(health::health))
        .route("/api/coach", post(coach::coach))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    Router::new()
        .merge(api_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.http.body_limit_bytes))
        // Cross-origin policy, configured once for the whole process
        .layer(cors_layer(&config.cors))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
