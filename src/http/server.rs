//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one mount per configured route
//! - Wire up middleware (tracing, request ID, limits, security headers)
//! - Bind server to listener
//! - Dispatch requests to the page renderers
//! - Observability (metrics, correlation IDs)

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, EchoConfig, RouteConfig};
use crate::http::request::{request_id, AxumRequestView, UuidRequestId, X_REQUEST_ID};
use crate::http::response::HtmlPage;
use crate::observability::metrics;
use crate::render::HandlerKind;
use crate::security;

/// Per-route state injected into the page handler.
#[derive(Debug, Clone)]
pub struct MountState {
    pub route: Arc<str>,
    pub handler: HandlerKind,
    /// Mount prefix as reported in `baseUrl` ("" for the root mount).
    pub base_url: Arc<str>,
}

impl MountState {
    pub fn new(route: &RouteConfig) -> Self {
        let base_url = if route.mount_path == "/" {
            ""
        } else {
            route.mount_path.as_str()
        };

        Self {
            route: Arc::from(route.name.as_str()),
            handler: route.handler,
            base_url: Arc::from(base_url),
        }
    }
}

/// HTTP server for the echo and hello pages.
pub struct HttpServer {
    router: Router,
    config: EchoConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The config is validated first: overlapping mounts cannot be turned
    /// into a router.
    pub fn new(config: EchoConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let router = Self::build_router(&config);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &EchoConfig) -> Router {
        let mut router = Router::new();

        for route in &config.routes {
            let state = MountState::new(route);
            tracing::debug!(
                route = %route.name,
                mount_path = %route.mount_path,
                handler = %route.handler,
                "Mounting route"
            );

            if route.mount_path == "/" {
                router = router.fallback_service(any(page_handler).with_state::<()>(state));
            } else {
                let mounted = Router::new()
                    .route("/", any(page_handler))
                    .route("/{*rest}", any(page_handler))
                    .with_state(state);
                router = router.nest(&route.mount_path, mounted);
            }
        }

        if config.security.enable_headers {
            router = security::apply_security_headers(router);
        }
        router = security::apply_limits(router, &config.security, &config.timeouts);

        if config.observability.request_id {
            router = router
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId));
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Router for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` resolves (see [`crate::lifecycle::Shutdown::signalled`]).
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EchoConfig {
        &self.config
    }
}

/// Renders the mounted handler's page for any method and path below the mount.
async fn page_handler(
    State(mount): State<MountState>,
    OriginalUri(original_uri): OriginalUri,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let view = AxumRequestView::new(&headers, &uri, &original_uri, &mount.base_url);

    tracing::debug!(
        request_id = %request_id(&headers),
        route = %mount.route,
        handler = %mount.handler,
        url = %uri,
        base_url = %mount.base_url,
        original_url = %original_uri,
        header_count = headers.keys_len(),
        "Rendering page"
    );

    match mount.handler.render(&view) {
        Ok(page) => {
            metrics::record_render(mount.handler, StatusCode::OK.as_u16(), start_time);
            HtmlPage(page).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id(&headers),
                route = %mount.route,
                error = %e,
                "Render failed"
            );
            metrics::record_render(
                mount.handler,
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                start_time,
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use tower::ServiceExt;

    use crate::http::response::HTML_CONTENT_TYPE;
    use crate::render::render_hello;

    fn route(name: &str, mount_path: &str, handler: HandlerKind) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            mount_path: mount_path.into(),
            handler,
        }
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_mount_state_base_url() {
        let root = MountState::new(&route("root", "/", HandlerKind::Echo));
        assert_eq!(&*root.base_url, "");

        let api = MountState::new(&route("api", "/api", HandlerKind::Echo));
        assert_eq!(&*api.base_url, "/api");
    }

    #[tokio::test]
    async fn test_default_routes() {
        let server = HttpServer::new(EchoConfig::default()).unwrap();

        let (status, headers, body) = get(server.router(), "/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert!(headers.contains_key(X_REQUEST_ID));
        assert_eq!(body, render_hello());

        let (status, _, body) = get(server.router(), "/anything?x=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""url": "/anything?x=1""#));
        assert!(body.contains(r#""baseUrl": """#));
        assert!(body.contains(r#""originalUrl": "/anything?x=1""#));
    }

    #[tokio::test]
    async fn test_nested_mount_fields() {
        let mut config = EchoConfig::default();
        config.routes = vec![route("api", "/api", HandlerKind::Echo)];
        let server = HttpServer::new(config).unwrap();

        let (status, _, body) = get(server.router(), "/api/x?q=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""url": "/x?q=1""#));
        assert!(body.contains(r#""baseUrl": "/api""#));
        assert!(body.contains(r#""originalUrl": "/api/x?q=1""#));

        let (status, _, body) = get(server.router(), "/api").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""url": "/""#));

        let (status, _, _) = get(server.router(), "/other").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_optional_layers_disabled() {
        let mut config = EchoConfig::default();
        config.security.enable_headers = false;
        config.observability.request_id = false;
        let server = HttpServer::new(config).unwrap();

        let (_, headers, _) = get(server.router(), "/hello").await;
        assert!(!headers.contains_key(header::X_CONTENT_TYPE_OPTIONS));
        assert!(!headers.contains_key(header::X_FRAME_OPTIONS));
        assert!(!headers.contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_any_method() {
        let server = HttpServer::new(EchoConfig::default()).unwrap();
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hello")
                    .body(Body::from("ignored"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = EchoConfig::default();
        config.security.max_body_size = 4;
        let server = HttpServer::new(config).unwrap();

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hello")
                    .header(header::CONTENT_LENGTH, "10")
                    .body(Body::from("0123456789"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hello")
                    .header(header::CONTENT_LENGTH, "4")
                    .body(Body::from("0123"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_overlapping_mounts_rejected() {
        let mut config = EchoConfig::default();
        config.routes = vec![
            route("a", "/api", HandlerKind::Echo),
            route("b", "/api", HandlerKind::Hello),
        ];
        assert!(matches!(
            HttpServer::new(config),
            Err(ConfigError::Validation(_))
        ));

        let mut config = EchoConfig::default();
        config.routes = vec![
            route("a", "/", HandlerKind::Echo),
            route("b", "/", HandlerKind::Hello),
        ];
        assert!(HttpServer::new(config).is_err());
    }
}
