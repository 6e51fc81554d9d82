//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use saiv_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    layer
        .allow_methods(methods)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn preflight(config: &CorsConfig, origin: &str) -> (Option<String>, Option<String>) {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(build_cors_layer(config));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let value = |name| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        (
            value(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            value(header::ACCESS_CONTROL_MAX_AGE),
        )
    }

    #[tokio::test]
    async fn test_wildcard_origin() {
        let (origin, max_age) = preflight(&CorsConfig::default(), "http://elsewhere.test").await;
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(max_age.as_deref(), Some("3600"));
    }

    #[tokio::test]
    async fn test_explicit_origins_skip_invalid_entries() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:8501".into(), "not a header\n".into()],
            max_age_seconds: 60,
            ..CorsConfig::default()
        };
        let (origin, max_age) = preflight(&config, "http://localhost:8501").await;
        assert_eq!(origin.as_deref(), Some("http://localhost:8501"));
        assert_eq!(max_age.as_deref(), Some("60"));

        let (origin, _) = preflight(&config, "http://elsewhere.test").await;
        assert!(origin.is_none());
    }
}
