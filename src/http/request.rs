//! Request handling and adaptation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Adapt axum request parts to the renderer's `RequestView`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The adapter borrows; nothing is copied until a snapshot is captured

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};

use crate::render::{HeaderSnapshot, RequestView};

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request ID for log lines, "unknown" when absent.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// `RequestView` over the parts axum hands a handler.
///
/// `uri` is the URI as seen below the mount point, `original_uri` the one
/// the client sent, `base_url` the mount prefix.
#[derive(Debug, Clone, Copy)]
pub struct AxumRequestView<'a> {
    headers: &'a HeaderMap,
    uri: &'a Uri,
    original_uri: &'a Uri,
    base_url: &'a str,
}

impl<'a> AxumRequestView<'a> {
    pub fn new(
        headers: &'a HeaderMap,
        uri: &'a Uri,
        original_uri: &'a Uri,
        base_url: &'a str,
    ) -> Self {
        Self {
            headers,
            uri,
            original_uri,
            base_url,
        }
    }
}

fn path_and_query(uri: &Uri) -> Option<&str> {
    uri.path_and_query().map(|pq| pq.as_str())
}

impl RequestView for AxumRequestView<'_> {
    fn headers(&self) -> Option<HeaderSnapshot> {
        Some(HeaderSnapshot::from(self.headers))
    }

    fn url(&self) -> Option<&str> {
        path_and_query(self.uri)
    }

    fn base_url(&self) -> Option<&str> {
        Some(self.base_url)
    }

    fn original_url(&self) -> Option<&str> {
        path_and_query(self.original_uri)
    }
}
