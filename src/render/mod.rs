//! Page rendering subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (any framework)
//!     → RequestView adapter (narrow read interface)
//!     → snapshot.rs (headers, url, baseUrl, originalUrl)
//!     → serde_json pretty printer (2-space indent)
//!     → template.rs (single placeholder substitution)
//!     → HTML string
//! ```
//!
//! # Design Decisions
//! - Rendering is pure: same input, byte-identical output
//! - No state survives an invocation
//! - Hello page is the zero-placeholder case of the same template type

pub mod echo;
pub mod hello;
pub mod snapshot;
pub mod template;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use echo::render_echo;
pub use hello::render_hello;
pub use snapshot::{HeaderEntry, HeaderSnapshot, RequestSnapshot, RequestView};
pub use template::Template;

/// Errors raised while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The snapshot could not be encoded as JSON.
    #[error("failed to serialize request snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which page a route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Echo the request's headers and URL fields.
    Echo,
    /// Fixed "Hello, World!" page.
    Hello,
}

impl HandlerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Echo => "echo",
            HandlerKind::Hello => "hello",
        }
    }

    /// Render this handler's page for `request`.
    pub fn render<R: RequestView + ?Sized>(
        &self,
        request: &R,
    ) -> Result<Cow<'static, str>, RenderError> {
        match self {
            HandlerKind::Echo => render_echo(request).map(Cow::Owned),
            HandlerKind::Hello => Ok(Cow::Borrowed(render_hello())),
        }
    }
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_ignores_request() {
        let a = RequestSnapshot {
            url: Some("/a".into()),
            ..Default::default()
        };
        let b = RequestSnapshot::default();

        let page_a = HandlerKind::Hello.render(&a).unwrap();
        let page_b = HandlerKind::Hello.render(&b).unwrap();
        assert_eq!(page_a, page_b);
        assert_eq!(page_a, render_hello());
    }

    #[test]
    fn test_echo_dispatch() {
        let request = RequestSnapshot {
            url: Some("/a".into()),
            ..Default::default()
        };
        let page = HandlerKind::Echo.render(&request).unwrap();
        assert!(page.contains(r#""url": "/a""#));
    }

    #[test]
    fn test_handler_kind_serde() {
        let kind: HandlerKind = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(kind, HandlerKind::Hello);
        assert_eq!(HandlerKind::Echo.to_string(), "echo");
    }
}
