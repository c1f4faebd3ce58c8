//! Copydown Render
//!
//! HTML emission for the copydown pipeline. The renderer walks a parsed
//! (and pipeline-annotated) [`Document`] and produces HTML; tables come out
//! wrapped in a copy container whose `<table>` carries the extracted
//! markdown source, followed by the copy button bar.
//!
//! Copy actions are resolved by [`CopyDispatcher`], which owns the handlers
//! the buttons target and computes CSV payloads lazily, off the render
//! path.
//!
//! # Example
//!
//! ```
//! use copydown_core::Document;
//! use copydown_config::Config;
//! use copydown_render::render;
//!
//! let doc = Document::new("plain", vec![]);
//! assert_eq!(render(&doc, &Config::default()), "");
//! ```

pub mod clipboard;
pub mod html;
pub mod table;

pub use clipboard::{
    table_copy_payload, CopyDispatcher, CopyFormat, CopyHandler, CopyRequest, NOT_FOUND,
};
pub use html::{escape_html, escape_html_attribute, render_inline};

use copydown_config::Config;
use copydown_core::{Alignment, Document, TableSection, TokenKind};
use copydown_pipeline::TABLE_SOURCE_ATTR;

/// Class on the div wrapping each rendered table.
pub const CONTAINER_CLASS: &str = "copydown-table";

/// Class on the div holding a table's copy buttons.
pub const BUTTON_BAR_CLASS: &str = "copydown-table-buttons";

/// Class on each copy button; the dispatcher's default selector targets it.
pub const COPY_BTN_CLASS: &str = "copydown-table-btn";

/// Attribute naming the payload format on a copy button.
pub const COPY_FORMAT_ATTR: &str = "data-copydown-format";

/// Section tracking for the table currently being rendered.
struct TableRenderState {
    columns: Vec<Alignment>,
    section: Option<TableSection>,
}

/// Document-to-HTML renderer.
pub struct Renderer<'a> {
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    /// Create a renderer using the given configuration.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render a document to HTML.
    ///
    /// Each block emits on its own line. Tables missing a source annotation
    /// render normally, just without the data attribute; the copy action
    /// then falls back to its sentinel.
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        let mut state: Option<TableRenderState> = None;

        for (index, token) in doc.tokens.iter().enumerate() {
            match &token.kind {
                TokenKind::Heading { level, text } => {
                    out.push_str(&format!(
                        "<h{level}>{}</h{level}>\n",
                        render_inline(text)
                    ));
                }
                TokenKind::Paragraph { text } => {
                    out.push_str(&format!("<p>{}</p>\n", render_inline(text)));
                }
                TokenKind::CodeBlock { language, body } => {
                    match language {
                        Some(language) => out.push_str(&format!(
                            "<pre><code class=\"language-{}\">",
                            escape_html_attribute(language)
                        )),
                        None => out.push_str("<pre><code>"),
                    }
                    out.push_str(&escape_html(body));
                    out.push_str("</code></pre>\n");
                }
                TokenKind::ThematicBreak => out.push_str("<hr>\n"),
                TokenKind::TableOpen { columns } => {
                    let source = doc.annotations.get(index, TABLE_SOURCE_ATTR);
                    table::open_table(&mut out, self.config, source);
                    state = Some(TableRenderState {
                        columns: columns.clone(),
                        section: None,
                    });
                }
                TokenKind::TableRow { section, cells } => {
                    let columns = match &mut state {
                        Some(table_state) => {
                            transition_section(&mut out, table_state, *section);
                            table_state.columns.clone()
                        }
                        // Stray row outside a table: render it bare
                        None => Vec::new(),
                    };
                    table::render_row(&mut out, *section, cells, &columns);
                }
                TokenKind::TableClose => {
                    if let Some(table_state) = state.take() {
                        close_section(&mut out, &table_state);
                        table::close_table(&mut out, self.config);
                    }
                }
            }
        }

        out
    }
}

/// Emit `<thead>`/`<tbody>` boundaries as the row stream moves between
/// sections.
fn transition_section(out: &mut String, state: &mut TableRenderState, section: TableSection) {
    match (state.section, section) {
        (None, TableSection::Header) => out.push_str("<thead>\n"),
        (None, TableSection::Body) => out.push_str("<tbody>\n"),
        (Some(TableSection::Header), TableSection::Body) => {
            out.push_str("</thead>\n<tbody>\n");
        }
        _ => {}
    }
    state.section = Some(section);
}

/// Close whichever section is open when the table ends.
fn close_section(out: &mut String, state: &TableRenderState) {
    match state.section {
        Some(TableSection::Header) => out.push_str("</thead>\n"),
        Some(TableSection::Body) => out.push_str("</tbody>\n"),
        None => {}
    }
}

/// Render a document with the given configuration.
pub fn render(doc: &Document, config: &Config) -> String {
    Renderer::new(config).render(doc)
}
