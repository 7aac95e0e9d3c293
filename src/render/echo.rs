//! Request echo page.

use crate::render::snapshot::{RequestSnapshot, RequestView};
use crate::render::template::Template;
use crate::render::RenderError;

/// Marker replaced by the JSON request dump.
pub const REQUEST_PLACEHOLDER: &str = "__REQUEST_HEADER__";

const ECHO_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>URL Test</title>
</head>
<body>
Your Request HEADERS
<p>
  <pre>
    __REQUEST_HEADER__
  </pre>
</p>
</body>
</html>
"#;

pub const ECHO_TEMPLATE: Template = Template::with_placeholder(ECHO_HTML, REQUEST_PLACEHOLDER);

/// Render the echo page for `request`.
///
/// The JSON dump uses two-space indentation and is inserted verbatim.
pub fn render_echo<R: RequestView + ?Sized>(request: &R) -> Result<String, RenderError> {
    let snapshot = RequestSnapshot::capture(request);
    render_snapshot(&snapshot)
}

/// Render the echo page for an already captured snapshot.
///
/// The JSON is inserted as-is, without HTML escaping: the page shows the
/// exact serializer output. A header value containing markup such as
/// `</pre>` therefore ends up as live markup in the document. Responses
/// carry `x-content-type-options: nosniff` and `x-frame-options: DENY`
/// unless security headers are disabled.
pub fn render_snapshot(snapshot: &RequestSnapshot) -> Result<String, RenderError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    Ok(ECHO_TEMPLATE.render(&json))
}
