//! Constant "Hello, World!" page.

use crate::render::template::Template;

const HELLO_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Hello</title>
</head>
<body>
<p>Hello, World!</p>
</body>
</html>
"#;

pub const HELLO_TEMPLATE: Template = Template::literal(HELLO_HTML);

/// The hello page. Takes no input.
pub fn render_hello() -> &'static str {
    HELLO_TEMPLATE.source()
}
