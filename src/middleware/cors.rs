//! CORS policy for the browser front end.
//!
//! - Development: any origin.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`; an empty
//!   list answers no origin at all.
//! - Credentials are never allowed; the API authenticates with a bearer header.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{AppEnv, Config};

const REQUEST_ID: &str = "x-request-id";

pub fn layer(app_env: AppEnv, allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if app_env.is_production() {
        let allowed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        AllowOrigin::list(allowed)
    } else {
        AllowOrigin::from(Any)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID)])
        .max_age(Duration::from_secs(60 * 10))
}

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config.app_env, &config.cors_allowed_origins))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app(app_env: AppEnv, origins: &[&str]) -> Router {
        let origins: Vec<String> = origins.iter().map(|s| s.to_string()).collect();
        Router::new()
            .route("/api/profile", get(|| async { "ok" }))
            .layer(layer(app_env, &origins))
    }

    async fn preflight(app: Router, origin: &str) -> Option<String> {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/profile")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn development_allows_any_origin() {
        let allowed = preflight(app(AppEnv::Development, &[]), "http://localhost:5173").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn production_only_echoes_listed_origins() {
        let listed = ["https://presensi.example"];

        let allowed = preflight(app(AppEnv::Production, &listed), "https://presensi.example").await;
        assert_eq!(allowed.as_deref(), Some("https://presensi.example"));

        let denied = preflight(app(AppEnv::Production, &listed), "https://evil.example").await;
        assert_eq!(denied, None);
    }
}
