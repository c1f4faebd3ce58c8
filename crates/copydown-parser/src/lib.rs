//! Copydown Parser
//!
//! A line-based markdown block parser producing the token stream consumed by
//! the copydown pipeline. Every block token carries a line map (a half-open
//! `[start, end)` range into the source), which is what the table source
//! extraction pass needs to recover original text.
//!
//! The grammar is deliberately small: ATX headings, fenced code blocks,
//! thematic breaks, pipe tables, and paragraphs. Tables do not nest; the
//! first pipe-delimited row opens a table, a separator row while in the
//! header switches to the body, and any non-table line closes it.
//!
//! # Example
//!
//! ```
//! use copydown_parser::Parser;
//! use copydown_core::TokenKind;
//!
//! let tokens = Parser::new().parse("| A |\n| - |\n| 1 |");
//! assert!(matches!(tokens[0].kind, TokenKind::TableOpen { .. }));
//! ```

use regex::Regex;
use std::sync::LazyLock;

use copydown_core::{Alignment, Document, LineSpan, TableSection, Token, TokenKind};

// =============================================================================
// Regex patterns
// =============================================================================

/// Regex for splitting physical lines (`\n` or `\r\n`)
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// Regex for code fences: ``` or ~~~ with optional info string
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(```+|~~~+)\s*([^\s]*)\s*$").unwrap());

/// Regex for closing code fences
static CODE_FENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(```+|~~~+)\s*$").unwrap());

/// Regex for ATX headings
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

/// Regex for thematic breaks
static HR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(---+|\*\*\*+|___+)\s*$").unwrap());

/// Regex for table rows
static TABLE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\|(.+)\|\s*$").unwrap());

/// Regex for the alignment separator (only |, -, :, spaces)
static TABLE_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s|:-]+$").unwrap());

// =============================================================================
// In-progress construct state
// =============================================================================

#[derive(Debug)]
struct ParagraphContext {
    start_line: usize,
    lines: Vec<String>,
}

#[derive(Debug)]
struct CodeContext {
    start_line: usize,
    fence_char: char,
    language: Option<String>,
    lines: Vec<String>,
}

#[derive(Debug)]
struct TableContext {
    /// Index of the table-open token, whose map gets patched on close
    open_index: usize,
    section: TableSection,
    last_row_line: usize,
}

// =============================================================================
// Parser
// =============================================================================

/// Block parser for complete documents.
///
/// Reusable: each [`Parser::parse`] call starts from a clean slate.
#[derive(Debug, Default)]
pub struct Parser {
    tokens: Vec<Token>,
    paragraph: Option<ParagraphContext>,
    code: Option<CodeContext>,
    table: Option<TableContext>,
}

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document into its token stream.
    pub fn parse(&mut self, src: &str) -> Vec<Token> {
        self.reset();

        let mut line_count = 0;
        for (line_no, line) in LINE_BREAK_RE.split(src).enumerate() {
            line_count = line_no + 1;
            self.parse_line(line_no, line);
        }
        self.finalize(line_count);

        log::debug!("parsed {} lines into {} tokens", line_count, self.tokens.len());
        std::mem::take(&mut self.tokens)
    }

    /// Parse a document straight into pipeline state.
    pub fn parse_document(src: &str) -> Document {
        let tokens = Parser::new().parse(src);
        Document::new(src, tokens)
    }

    fn reset(&mut self) {
        self.tokens.clear();
        self.paragraph = None;
        self.code = None;
        self.table = None;
    }

    fn parse_line(&mut self, line_no: usize, line: &str) {
        // Code blocks consume everything until the closing fence
        if self.code.is_some() {
            self.parse_in_code_block(line_no, line);
            return;
        }

        if line.trim().is_empty() {
            self.flush_paragraph();
            self.close_table();
            return;
        }

        if self.try_parse_code_fence(line_no, line) {
            return;
        }
        if self.try_parse_heading(line_no, line) {
            return;
        }
        if self.try_parse_hr(line_no, line) {
            return;
        }
        if self.try_parse_table(line_no, line) {
            return;
        }

        // Plain text: ends a table, continues or starts a paragraph
        self.close_table();
        match &mut self.paragraph {
            Some(paragraph) => paragraph.lines.push(line.trim().to_string()),
            None => {
                self.paragraph = Some(ParagraphContext {
                    start_line: line_no,
                    lines: vec![line.trim().to_string()],
                });
            }
        }
    }

    // =========================================================================
    // Code blocks
    // =========================================================================

    fn parse_in_code_block(&mut self, line_no: usize, line: &str) {
        let closes = CODE_FENCE_END_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().starts_with(self.code.as_ref().unwrap().fence_char))
            .unwrap_or(false);

        if closes {
            let code = self.code.take().unwrap();
            self.tokens.push(Token::with_map(
                TokenKind::CodeBlock {
                    language: code.language,
                    body: code.lines.join("\n"),
                },
                LineSpan::new(code.start_line, line_no + 1),
            ));
        } else {
            self.code.as_mut().unwrap().lines.push(line.to_string());
        }
    }

    fn try_parse_code_fence(&mut self, line_no: usize, line: &str) -> bool {
        if let Some(caps) = CODE_FENCE_RE.captures(line) {
            let fence = caps.get(1).map(|m| m.as_str()).unwrap_or("```");
            let language = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());

            self.flush_paragraph();
            self.close_table();
            self.code = Some(CodeContext {
                start_line: line_no,
                fence_char: fence.chars().next().unwrap_or('`'),
                language,
                lines: Vec::new(),
            });
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Headings and thematic breaks
    // =========================================================================

    fn try_parse_heading(&mut self, line_no: usize, line: &str) -> bool {
        if let Some(caps) = HEADING_RE.captures(line.trim()) {
            let hashes = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let text = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            self.flush_paragraph();
            self.close_table();
            self.tokens.push(Token::with_map(
                TokenKind::Heading {
                    level: hashes.len().min(6) as u8,
                    text: text.to_string(),
                },
                LineSpan::single(line_no),
            ));
            true
        } else {
            false
        }
    }

    fn try_parse_hr(&mut self, line_no: usize, line: &str) -> bool {
        if HR_RE.is_match(line.trim()) {
            self.flush_paragraph();
            self.close_table();
            self.tokens.push(Token::with_map(
                TokenKind::ThematicBreak,
                LineSpan::single(line_no),
            ));
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn try_parse_table(&mut self, line_no: usize, line: &str) -> bool {
        let inner = match TABLE_ROW_RE.captures(line) {
            Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string(),
            None => return false,
        };

        // Separator row: switch header -> body, record column alignments
        if let Some(table) = &mut self.table {
            if table.section == TableSection::Header && TABLE_SEP_RE.is_match(&inner) {
                let columns = parse_alignments(&inner);
                if let TokenKind::TableOpen { columns: declared } =
                    &mut self.tokens[table.open_index].kind
                {
                    *declared = columns;
                }
                table.section = TableSection::Body;
                table.last_row_line = line_no;
                return true;
            }
        }

        if self.table.is_none() {
            self.flush_paragraph();
            self.tokens.push(Token::with_map(
                TokenKind::TableOpen { columns: Vec::new() },
                LineSpan::single(line_no),
            ));
            self.table = Some(TableContext {
                open_index: self.tokens.len() - 1,
                section: TableSection::Header,
                last_row_line: line_no,
            });
        }

        let table = self.table.as_mut().unwrap();
        table.last_row_line = line_no;
        let section = table.section;
        let cells: Vec<String> = inner.split('|').map(|s| s.trim().to_string()).collect();
        self.tokens.push(Token::with_map(
            TokenKind::TableRow { section, cells },
            LineSpan::single(line_no),
        ));
        true
    }

    /// Close the open table: extend the open token's map over the whole
    /// table and emit the close token (which carries no map).
    fn close_table(&mut self) {
        if let Some(table) = self.table.take() {
            if let Some(map) = &mut self.tokens[table.open_index].map {
                map.end = table.last_row_line + 1;
            }
            self.tokens.push(Token::new(TokenKind::TableClose));
        }
    }

    // =========================================================================
    // Paragraphs and finalization
    // =========================================================================

    fn flush_paragraph(&mut self) {
        if let Some(paragraph) = self.paragraph.take() {
            let end = paragraph.start_line + paragraph.lines.len();
            self.tokens.push(Token::with_map(
                TokenKind::Paragraph {
                    text: paragraph.lines.join("\n"),
                },
                LineSpan::new(paragraph.start_line, end),
            ));
        }
    }

    /// Close any construct still open at end of input.
    fn finalize(&mut self, line_count: usize) {
        if let Some(code) = self.code.take() {
            // Unterminated fence: everything to the end is code
            self.tokens.push(Token::with_map(
                TokenKind::CodeBlock {
                    language: code.language,
                    body: code.lines.join("\n"),
                },
                LineSpan::new(code.start_line, line_count),
            ));
        }
        self.flush_paragraph();
        self.close_table();
    }
}

/// Parse per-column alignments from a separator row's inner text.
fn parse_alignments(inner: &str) -> Vec<Alignment> {
    inner
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| {
            match (cell.starts_with(':'), cell.ends_with(':')) {
                (true, true) => Alignment::Center,
                (true, false) => Alignment::Left,
                (false, true) => Alignment::Right,
                (false, false) => Alignment::None,
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
