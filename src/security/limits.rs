//! Request limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//! - Enforce the total request timeout
//!
//! # Design Decisions
//! - Body limit rejects with 413 Payload Too Large before the handler runs
//! - Timeout answers 408 Request Timeout

use std::time::Duration;

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::schema::{SecurityConfig, TimeoutConfig};

/// Wrap `router` with the body size and request timeout limits.
#[allow(deprecated)]
pub fn apply_limits(router: Router, security: &SecurityConfig, timeouts: &TimeoutConfig) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
}
