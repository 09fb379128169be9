//! Minimal HTML markup primitives.
//!
//! Everything the shell and the need bars emit goes through [`Render`], so
//! escaping happens in exactly one place.

use std::fmt;

/// An owned HTML fragment that is already safe to splice into a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Trust `html` verbatim. Use only for static or pre-rendered content.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape `text` for use as element content.
    pub fn text(text: &str) -> Self {
        let mut out = String::with_capacity(text.len());
        escape_text(text, &mut out);
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

/// Anything that can write itself as HTML.
pub trait Render {
    fn render_to(&self, out: &mut String);

    fn render(&self) -> Markup {
        let mut out = String::new();
        self.render_to(&mut out);
        Markup(out)
    }
}

impl Render for Markup {
    fn render_to(&self, out: &mut String) {
        out.push_str(&self.0);
    }
}

impl Render for str {
    fn render_to(&self, out: &mut String) {
        escape_text(self, out);
    }
}

impl Render for String {
    fn render_to(&self, out: &mut String) {
        escape_text(self, out);
    }
}

impl<T: Render> Render for [T] {
    fn render_to(&self, out: &mut String) {
        for item in self {
            item.render_to(out);
        }
    }
}

impl<T: Render> Render for Vec<T> {
    fn render_to(&self, out: &mut String) {
        self.as_slice().render_to(out);
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render_to(&self, out: &mut String) {
        (**self).render_to(out);
    }
}

/// Escape element content.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape an attribute value (always emitted double-quoted).
pub fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Push ` name="value"` with the value escaped.
pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr(value, out);
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_escaping() {
        let markup = Markup::text("Fish & <Chips>");
        assert_eq!(markup.as_str(), "Fish &amp; &lt;Chips&gt;");
    }

    #[test]
    fn test_text_leaves_quotes() {
        assert_eq!(Markup::text(r#"say "hi""#).as_str(), r#"say "hi""#);
    }

    #[test]
    fn test_attr_escaping() {
        let mut out = String::new();
        push_attr(&mut out, "title", r#"a "b" & 'c'"#);
        assert_eq!(out, r#" title="a &quot;b&quot; &amp; &#39;c&#39;""#);
    }

    #[test]
    fn test_raw_is_verbatim() {
        let markup = Markup::raw("<b>bold</b>");
        assert_eq!(markup.render().as_str(), "<b>bold</b>");
    }

    #[test]
    fn test_sequence_renders_in_order() {
        let parts = vec![Markup::raw("<i>1</i>"), Markup::raw("<i>2</i>")];
        assert_eq!(parts.render().as_str(), "<i>1</i><i>2</i>");
    }

    #[test]
    fn test_str_render_escapes() {
        assert_eq!("1 < 2".render().as_str(), "1 &lt; 2");
    }
}
