//! HTML text utilities: escaping and minimal inline emphasis.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for inline code spans
static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Regex for bold spans
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

/// Regex for italic spans
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

/// Escape HTML special characters in text content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape HTML special characters in attribute values.
///
/// Also encodes line breaks and tabs so multi-line values (like table
/// source text) survive the round trip through an attribute.
pub fn escape_html_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
    out
}

/// Render a line of text to HTML with minimal inline emphasis.
///
/// Escapes first, then rewrites `` `code` ``, `**bold**`, and `*italic*`
/// spans. Single-level only; nested emphasis is out of scope for this
/// renderer.
pub fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let code = CODE_SPAN_RE.replace_all(&escaped, "<code>$1</code>");
    let bold = BOLD_RE.replace_all(&code, "<strong>$1</strong>");
    ITALIC_RE.replace_all(&bold, "<em>$1</em>").into_owned()
}
