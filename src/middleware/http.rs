//! Transport-level middleware shared by every route.
//!
//! - Request id: generated when absent, echoed back, and attached to the trace span
//! - Body limit: 1 MiB, rejected with the JSON error envelope
//! - Access log via `TraceLayer`
//!
//! No timeout layer: upstream calls are awaited as-is.

use axum::Router;
use axum::http::{Request, StatusCode, header, header::HeaderName};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

const REQUEST_ID: &str = "x-request-id";
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
        let request_id = req
            .headers()
            .get(REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http",
            method = %req.method(),
            path = %req.uri().path(),
            request_id = %request_id,
        )
    });

    let layers = ServiceBuilder::new()
        // Outermost: make sure an id exists before the span is created.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(trace);

    // Innermost first: the limit answers oversized bodies on its own, in plain
    // text, so the envelope mapping has to sit directly outside it.
    router
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(map_response(envelope_oversized))
        .layer(layers)
}

async fn envelope_oversized(res: Response) -> Response {
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));

    if res.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return AppError::PayloadTooLarge.into_response();
    }
    res
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        routing::{get, post},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn request_id_is_generated_and_echoed() {
        let app = apply(Router::new().route("/health", get(|| async { "ok" })));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID));
    }

    #[tokio::test]
    async fn caller_supplied_request_id_is_kept() {
        let app = apply(Router::new().route("/health", get(|| async { "ok" })));

        let req = Request::builder()
            .uri("/health")
            .header(REQUEST_ID, "req-123")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.headers()[REQUEST_ID], "req-123");
    }

    #[tokio::test]
    async fn oversized_body_gets_the_error_envelope() {
        let app = apply(Router::new().route("/reports", post(|body: String| async move { body })));
        let payload = vec![b'a'; 2 * BODY_LIMIT_BYTES];

        let req = Request::builder()
            .method("POST")
            .uri("/reports")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(resp.headers().contains_key(REQUEST_ID));
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "Request body too large");
    }

    #[tokio::test]
    async fn streamed_oversized_body_gets_the_error_envelope() {
        let app = apply(Router::new().route("/reports", post(|body: String| async move { body })));

        // No Content-Length: the limit trips while the handler reads the body.
        let req = Request::builder()
            .method("POST")
            .uri("/reports")
            .body(Body::from(vec![b'a'; 2 * BODY_LIMIT_BYTES]))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Request body too large");
    }
}
