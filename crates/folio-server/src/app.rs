//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Headers forced onto every API response, error bodies included.
///
/// Responses are JSON only: no subresource may load and no page may frame them.
const API_HEADERS: [(&str, &str); 3] = [
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/api/layout/", get(handlers::layout::get_root_layout))
        .route("/api/layout/{*slug}", get(handlers::layout::get_layout))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*slug}", get(handlers::pages::get_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    API_HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use folio_renderer::DocumentPipeline;
    use folio_site::{DocumentSource, MockSource, SETTINGS_PATH, Site};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const SETTINGS: &str = r#"{
        "title": "Blog",
        "icon": "✍️",
        "navigation": [
            {"icon": "📝", "link": "posts", "sub": [{"icon": "👋", "link": "hello"}]}
        ]
    }"#;

    fn router(source: MockSource) -> Router {
        let source: Arc<dyn DocumentSource> = Arc::new(source);
        create_router(Arc::new(AppState {
            site: Site::new(source, DocumentPipeline::default()),
            version: "test".to_owned(),
        }))
    }

    fn source() -> MockSource {
        MockSource::new()
            .with_document(SETTINGS_PATH, SETTINGS)
            .with_document("README.md", "# Home\n")
            .with_document(
                "posts/hello/README.md",
                "---\ntitle: Hello\n---\n\n```js\nlet x = 1;\n```\n",
            )
            .with_status("posts/broken/README.md", 500)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_root_page() {
        let (status, headers, body) = get(router(source()), "/api/pages/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"text": "<h1>Home</h1>\n", "matter": null}));
        assert!(headers.contains_key(header::ETAG));
    }

    #[tokio::test]
    async fn test_nested_page_with_frontmatter() {
        let (status, _, body) = get(router(source()), "/api/pages/posts/hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matter"], json!({"title": "Hello"}));
        let text = body["text"].as_str().unwrap();
        assert!(text.starts_with("<div class=\"highlight highlight-js\"><pre>"));
    }

    #[tokio::test]
    async fn test_missing_page_is_404() {
        let (status, _, body) = get(router(source()), "/api/pages/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "not found", "status": 404}));
    }

    #[tokio::test]
    async fn test_upstream_error_is_500() {
        let (status, _, body) = get(router(source()), "/api/pages/posts/broken").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal error", "status": 500}));
    }

    #[tokio::test]
    async fn test_if_none_match_returns_304() {
        let (_, headers, _) = get(router(source()), "/api/pages/").await;
        let etag = headers.get(header::ETAG).unwrap().clone();

        let response = router(source())
            .oneshot(
                Request::get("/api/pages/")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_layout_with_breadcrumbs() {
        let (status, _, body) = get(router(source()), "/api/layout/posts/hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Blog");
        assert_eq!(
            body["breadCrumbs"],
            json!([
                {"icon": "📝", "link": "posts"},
                {"icon": "👋", "link": "posts/hello"}
            ])
        );
    }

    #[tokio::test]
    async fn test_root_layout_has_no_breadcrumbs() {
        let (status, _, body) = get(router(source()), "/api/layout/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["breadCrumbs"], json!([]));
    }

    #[tokio::test]
    async fn test_layout_failure_is_500() {
        let (status, _, body) = get(router(MockSource::new()), "/api/layout/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }

    #[tokio::test]
    async fn test_api_headers_on_every_response() {
        for uri in ["/api/pages/", "/api/pages/nope", "/api/layout/posts"] {
            let (_, headers, _) = get(router(source()), uri).await;

            for (name, value) in API_HEADERS {
                assert_eq!(headers[name], value, "{name} on {uri}");
            }
        }
    }

}
