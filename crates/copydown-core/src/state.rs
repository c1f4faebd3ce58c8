//! Per-document pipeline state.
//!
//! A [`Document`] owns everything a pipeline pass may touch: the original
//! source text, the token stream, and the [`Annotations`] store. Passes
//! mutate the document they are handed and keep no state of their own, so a
//! single pass instance can serve any number of documents.

use crate::token::Token;
use std::collections::HashMap;

/// String attributes attached to tokens, stored alongside the stream.
///
/// Keyed by token index. Within one token's bag each key is unique;
/// re-setting a key replaces its value, which keeps passes idempotent when
/// they run twice over the same stream. Insertion order is not significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    attrs: HashMap<usize, Vec<(String, String)>>,
}

impl Annotations {
    /// Create an empty annotation store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `key = value` to the token at `index`, replacing any previous
    /// value stored under the same key.
    pub fn set(&mut self, index: usize, key: &str, value: impl Into<String>) {
        let bag = self.attrs.entry(index).or_default();
        let value = value.into();
        match bag.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => bag.push((key.to_string(), value)),
        }
    }

    /// Look up an attribute on the token at `index`.
    pub fn get(&self, index: usize, key: &str) -> Option<&str> {
        self.attrs
            .get(&index)?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes attached to the token at `index`.
    pub fn all(&self, index: usize) -> &[(String, String)] {
        self.attrs.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of tokens carrying at least one attribute.
    pub fn annotated_tokens(&self) -> usize {
        self.attrs.len()
    }

    /// Whether no token carries any attribute.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// State for one document's trip through the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Original source text, exactly as fed to the parser
    pub src: String,
    /// Parsed token stream
    pub tokens: Vec<Token>,
    /// Token attributes added by pipeline passes
    pub annotations: Annotations,
}

impl Document {
    /// Create pipeline state from source text and its token stream.
    pub fn new(src: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            src: src.into(),
            tokens,
            annotations: Annotations::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_annotations_set_get() {
        let mut annotations = Annotations::new();
        assert!(annotations.is_empty());

        annotations.set(2, "data-x", "one");
        assert_eq!(annotations.get(2, "data-x"), Some("one"));
        assert_eq!(annotations.get(2, "data-y"), None);
        assert_eq!(annotations.get(0, "data-x"), None);
        assert_eq!(annotations.annotated_tokens(), 1);
    }

    #[test]
    fn test_annotations_replace_on_rekey() {
        let mut annotations = Annotations::new();
        annotations.set(0, "data-x", "first");
        annotations.set(0, "data-x", "second");

        assert_eq!(annotations.get(0, "data-x"), Some("second"));
        assert_eq!(annotations.all(0).len(), 1);
    }

    #[test]
    fn test_annotations_multiple_keys() {
        let mut annotations = Annotations::new();
        annotations.set(1, "a", "1");
        annotations.set(1, "b", "2");

        assert_eq!(annotations.all(1).len(), 2);
        assert_eq!(annotations.get(1, "a"), Some("1"));
        assert_eq!(annotations.get(1, "b"), Some("2"));
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new("# Hi", vec![Token::new(TokenKind::ThematicBreak)]);
        assert_eq!(doc.src, "# Hi");
        assert_eq!(doc.tokens.len(), 1);
        assert!(doc.annotations.is_empty());
    }
}
