//! Response construction.
//!
//! # Responsibilities
//! - Wrap rendered pages with the HTML content type
//! - Map render failures to 500 responses
//!
//! # Design Decisions
//! - Content type is fixed to `text/html; charset=UTF-8`
//! - Error bodies never include request data

use std::borrow::Cow;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::render::RenderError;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// A rendered HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPage(pub Cow<'static, str>);

impl IntoResponse for HtmlPage {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.0));
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(HTML_CONTENT_TYPE),
        );
        response
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
    }
}
