//! Static HTML templates with at most one substitution point.

/// A static text block with an optional placeholder token.
///
/// Rendering splits the source on the first occurrence of the token and
/// joins the halves around the substituted content. A template without a
/// token (or whose source does not contain it) renders to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    source: &'static str,
    placeholder: Option<&'static str>,
}

impl Template {
    /// A template with no substitution point.
    pub const fn literal(source: &'static str) -> Self {
        Self {
            source,
            placeholder: None,
        }
    }

    /// A template with a single substitution point marked by `placeholder`.
    pub const fn with_placeholder(source: &'static str, placeholder: &'static str) -> Self {
        Self {
            source,
            placeholder: Some(placeholder),
        }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Number of times the placeholder token occurs in the source.
    pub fn placeholder_count(&self) -> usize {
        match self.placeholder {
            Some(token) if !token.is_empty() => self.source.matches(token).count(),
            _ => 0,
        }
    }

    /// Substitute `content` at the placeholder.
    pub fn render(&self, content: &str) -> String {
        let split = self
            .placeholder
            .filter(|token| !token.is_empty())
            .and_then(|token| self.source.split_once(token));

        match split {
            Some((head, tail)) => {
                let mut out = String::with_capacity(head.len() + content.len() + tail.len());
                out.push_str(head);
                out.push_str(content);
                out.push_str(tail);
                out
            }
            None => self.source.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_at_placeholder() {
        let template = Template::with_placeholder("<pre>__X__</pre>", "__X__");
        assert_eq!(template.placeholder_count(), 1);
        assert_eq!(template.render("hi"), "<pre>hi</pre>");
    }

    #[test]
    fn test_content_is_not_rescanned() {
        let template = Template::with_placeholder("[__X__]", "__X__");
        assert_eq!(template.render("__X__"), "[__X__]");
    }

    #[test]
    fn test_literal_ignores_content() {
        let template = Template::literal("<p>fixed</p>");
        assert_eq!(template.placeholder_count(), 0);
        assert_eq!(template.render("ignored"), "<p>fixed</p>");
    }

    #[test]
    fn test_missing_token_renders_source() {
        let template = Template::with_placeholder("no marker", "__X__");
        assert_eq!(template.placeholder_count(), 0);
        assert_eq!(template.render("x"), "no marker");
    }
}
