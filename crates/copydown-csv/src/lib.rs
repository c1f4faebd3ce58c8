//! Copydown CSV
//!
//! Converts a markdown pipe table into RFC 4180 CSV text. This is a pure
//! transformation with no configuration surface: comma delimiter, `\n` row
//! joins, no trailing newline.
//!
//! # Example
//!
//! ```
//! use copydown_csv::markdown_table_to_csv;
//!
//! let table = "| A | B |\n| - | - |\n| 1 | 2 |";
//! assert_eq!(markdown_table_to_csv(table), "A,B\n1,2");
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Regex for splitting physical lines (`\n` or `\r\n`)
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// Regex for the alignment separator row: only `:`, `-`, `|`, and spaces
static SEPARATOR_ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[:\-| ]+$").unwrap());

/// Convert a markdown table to CSV text.
///
/// Rows convert in visual order with the header first. The alignment
/// separator row is metadata, not data: it is dropped, but only when it is
/// the second non-empty line. A separator-shaped line anywhere else is kept
/// as ordinary data. Rows are converted independently; a row with a
/// different cell count than the header stays ragged.
pub fn markdown_table_to_csv(table: &str) -> String {
    csv_rows(table)
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| escape_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a markdown table into its CSV row set: ordered rows of ordered,
/// trimmed cell strings, with the alignment separator row omitted.
pub fn csv_rows(table: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = LINE_BREAK_RE
        .split(table.trim())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .iter()
        .enumerate()
        .filter(|(i, line)| !(*i == 1 && SEPARATOR_ROW_RE.is_match(line)))
        .map(|(_, line)| split_cells(line))
        .collect()
}

/// Split one table row into trimmed cells.
///
/// One leading and one trailing pipe are stripped when present, so rows
/// written without outer pipes parse the same as fully piped ones.
fn split_cells(row: &str) -> Vec<String> {
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Escape one cell per RFC 4180 §2 rule 7.
///
/// A cell containing a comma, double quote, carriage return, or line feed is
/// wrapped in double quotes with internal quotes doubled; anything else
/// passes through untouched. The quoting test looks at the original cell
/// text, not the doubled payload. An embedded line break stays literal
/// inside the quotes, so the quoted field spans multiple physical lines of
/// output.
pub fn escape_cell(cell: &str) -> String {
    let escaped = cell.replace('"', "\"\"");
    if cell.contains([',', '"', '\r', '\n']) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
