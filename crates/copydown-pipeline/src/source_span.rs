//! Table source extraction.
//!
//! Recovers the exact original text of every syntactically complete table
//! and attaches it to the table-open token, where the renderer picks it up
//! as a copy payload. Runs once per document; nothing else in the stream is
//! touched.

use crate::CoreRule;
use copydown_core::{Document, LineSpan};
use regex::Regex;
use std::sync::LazyLock;

/// Attribute key under which a table's original source is stored.
///
/// Namespaced so it cannot collide with attributes other passes attach, and
/// emitted verbatim as the HTML data attribute on the `<table>` element.
pub const TABLE_SOURCE_ATTR: &str = "data-copydown-source";

/// Regex for splitting physical lines (`\n` or `\r\n`)
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// Pipeline rule attaching each table's original markdown text to its
/// opening token.
///
/// A table-open token qualifies when the next open/close-typed token in the
/// stream is a table-close (table grammar does not nest, so a two-state
/// scan is sufficient: a second open before a close simply replaces the
/// pending one) and when the open token carries a line map. Anything else
/// is skipped silently; a missing attribute is the signal downstream that
/// no source was recoverable.
pub struct SourceSpanExtractor;

impl CoreRule for SourceSpanExtractor {
    fn name(&self) -> &str {
        "table_source_extractor"
    }

    fn run(&self, doc: &mut Document) {
        let mut pending_open: Option<usize> = None;

        for index in 0..doc.tokens.len() {
            let token = &doc.tokens[index];
            if token.is_table_open() {
                pending_open = Some(index);
            } else if token.is_table_close() {
                if let Some(open_index) = pending_open.take() {
                    if let Some(map) = doc.tokens[open_index].map {
                        let source = slice_lines(&doc.src, map);
                        log::debug!(
                            "attached table source for lines [{}, {}) to token {}",
                            map.start,
                            map.end,
                            open_index
                        );
                        doc.annotations.set(open_index, TABLE_SOURCE_ATTR, source);
                    }
                }
            }
        }
    }
}

/// Extract lines `[span.start, span.end)` of `src`, joined with `\n`.
///
/// Splits on `\n` or `\r\n` and joins with `\n`, normalizing the line-ending
/// style. Out-of-range spans are clamped rather than rejected.
fn slice_lines(src: &str, span: LineSpan) -> String {
    let lines: Vec<&str> = LINE_BREAK_RE.split(src).collect();
    let start = span.start.min(lines.len());
    let end = span.end.min(lines.len());
    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use copydown_core::{Token, TokenKind};

    fn open_with_map(start: usize, end: usize) -> Token {
        Token::with_map(
            TokenKind::TableOpen { columns: vec![] },
            LineSpan::new(start, end),
        )
    }

    fn close() -> Token {
        Token::new(TokenKind::TableClose)
    }

    fn run(src: &str, tokens: Vec<Token>) -> Document {
        let mut doc = Document::new(src, tokens);
        SourceSpanExtractor.run(&mut doc);
        doc
    }

    #[test]
    fn test_span_extraction_determinism() {
        // A table on lines 3-5 gets exactly those lines, regardless of
        // surrounding content
        let src = "intro\n\nmore\n| A | B |\n| - | - |\n| 1 | 2 |\ntrailing";
        let doc = run(src, vec![open_with_map(3, 6), close()]);

        assert_eq!(
            doc.annotations.get(0, TABLE_SOURCE_ATTR),
            Some("| A | B |\n| - | - |\n| 1 | 2 |")
        );
    }

    #[test]
    fn test_crlf_source_normalized() {
        let src = "| A |\r\n| - |\r\n| 1 |";
        let doc = run(src, vec![open_with_map(0, 3), close()]);

        assert_eq!(
            doc.annotations.get(0, TABLE_SOURCE_ATTR),
            Some("| A |\n| - |\n| 1 |")
        );
    }

    #[test]
    fn test_unmatched_open_not_annotated() {
        // Open with no following close: skipped, no panic
        let doc = run("| A |", vec![open_with_map(0, 1)]);
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_open_without_map_skipped() {
        let doc = run(
            "| A |",
            vec![Token::new(TokenKind::TableOpen { columns: vec![] }), close()],
        );
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_close_without_open_ignored() {
        let doc = run("text", vec![close(), close()]);
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_open_open_close_matches_latest() {
        // Two opens then a close: the later open wins, the earlier one is
        // silently unmatched
        let src = "| A |\n| B |";
        let doc = run(
            src,
            vec![open_with_map(0, 1), open_with_map(1, 2), close()],
        );

        assert_eq!(doc.annotations.get(0, TABLE_SOURCE_ATTR), None);
        assert_eq!(doc.annotations.get(1, TABLE_SOURCE_ATTR), Some("| B |"));
    }

    #[test]
    fn test_multiple_tables_all_annotated() {
        let src = "| A |\n| - |\n\n| X |\n| - |";
        let doc = run(
            src,
            vec![
                open_with_map(0, 2),
                close(),
                open_with_map(3, 5),
                close(),
            ],
        );

        assert_eq!(
            doc.annotations.get(0, TABLE_SOURCE_ATTR),
            Some("| A |\n| - |")
        );
        assert_eq!(
            doc.annotations.get(2, TABLE_SOURCE_ATTR),
            Some("| X |\n| - |")
        );
    }

    #[test]
    fn test_intervening_tokens_do_not_break_pairing() {
        // Row tokens between open and close are not open/close-typed, so
        // the pair still matches
        let src = "| A |\n| - |";
        let doc = run(
            src,
            vec![
                open_with_map(0, 2),
                Token::new(TokenKind::TableRow {
                    section: copydown_core::TableSection::Header,
                    cells: vec!["A".into()],
                }),
                close(),
            ],
        );
        assert_eq!(
            doc.annotations.get(0, TABLE_SOURCE_ATTR),
            Some("| A |\n| - |")
        );
    }

    #[test]
    fn test_idempotent_rerun() {
        let src = "| A |\n| - |";
        let mut doc = Document::new(src, vec![open_with_map(0, 2), close()]);
        SourceSpanExtractor.run(&mut doc);
        let first = doc.annotations.clone();
        SourceSpanExtractor.run(&mut doc);

        assert_eq!(doc.annotations, first);
        assert_eq!(doc.annotations.all(0).len(), 1);
    }

    #[test]
    fn test_out_of_range_map_clamped() {
        let doc = run("| A |", vec![open_with_map(0, 99), close()]);
        assert_eq!(doc.annotations.get(0, TABLE_SOURCE_ATTR), Some("| A |"));

        let doc = run("| A |", vec![open_with_map(50, 99), close()]);
        assert_eq!(doc.annotations.get(0, TABLE_SOURCE_ATTR), Some(""));
    }

    #[test]
    fn test_slice_lines() {
        assert_eq!(slice_lines("a\nb\nc\nd", LineSpan::new(1, 3)), "b\nc");
        assert_eq!(slice_lines("a\r\nb\r\nc", LineSpan::new(0, 2)), "a\nb");
        assert_eq!(slice_lines("a", LineSpan::new(0, 0)), "");
    }
}
