//! Request middleware applied to every route.
//!
//! `request_id_layer` generates a UUID v4 for each incoming request and creates a
//! tracing span that wraps the whole request lifecycle, so every log emitted while
//! handling it carries the `request_id` field. `cors_layer` builds the process-wide
//! cross-origin policy from configuration.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::header::{HeaderName, HeaderValue};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::CorsConfig;

/// Response header carrying the generated request ID
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost layer so the span wraps all request
/// processing, including the CORS layer and handlers.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Build the cross-origin policy.
///
/// A `"*"` entry permits every origin. Otherwise only the listed origins are
/// echoed back; entries that are not valid header values are skipped (config
/// validation rejects them before this point). Any method and request header
/// is allowed either way.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([REQUEST_ID_HEADER])
        .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
    use std::convert::Infallible;
    use tower::{service_fn, ServiceBuilder, ServiceExt};

    async fn cors_response(config: &CorsConfig, request: Request) -> Response {
        ServiceBuilder::new()
            .layer(cors_layer(config))
            .service(service_fn(|_req: Request| async {
                Ok::<_, Infallible>(Response::new(Body::empty()))
            }))
            .oneshot(request)
            .await
            .unwrap()
    }

    fn from_origin(origin: &str) -> Request {
        Request::builder()
            .uri("/healthz")
            .header(ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_layer_any_origin() {
        let response = cors_response(&CorsConfig::default(), from_origin("http://localhost:3000")).await;
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_layer_origin_list() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };

        let response = cors_response(&config, from_origin("http://localhost:3000")).await;
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let response = cors_response(&config, from_origin("http://other.example.com")).await;
        assert!(!response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_cors_layer_allows_any_request_header() {
        let request = Request::builder()
            .method(http::Method::OPTIONS)
            .uri("/api/coach")
            .header(ORIGIN, "http://localhost:3000")
            .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(http::header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type, x-client-version")
            .body(Body::empty())
            .unwrap();
        let response = cors_response(&CorsConfig::default(), request).await;
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_HEADERS], "*");
    }
}
