//! Security response headers.
//!
//! # Responsibilities
//! - Add `X-Content-Type-Options: nosniff`
//! - Add `X-Frame-Options: DENY`
//!
//! # Design Decisions
//! - Headers a handler already set are left alone

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Wrap `router` with the security response headers.
pub fn apply_security_headers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}
