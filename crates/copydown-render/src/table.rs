//! Table markup assembly.
//!
//! Renders a table wrapped in the copy container: an outer div, the
//! `<table>` carrying its extracted source as a data attribute, and the
//! button bar the copy dispatcher targets. Markup shape:
//!
//! ```text
//! <div class="copydown-table" style="...">
//! <table data-copydown-source="...">
//!   ... thead/tbody rows ...
//! </table>
//! <div class="copydown-table-buttons" style="...">
//! <button class="copydown-table-btn" data-copydown-format="md">...</button>
//! <button class="copydown-table-btn" data-copydown-format="csv">...</button>
//! </div>
//! </div>
//! ```

use crate::clipboard::CopyFormat;
use crate::html::{escape_html_attribute, render_inline};
use crate::{BUTTON_BAR_CLASS, CONTAINER_CLASS, COPY_BTN_CLASS, COPY_FORMAT_ATTR};
use copydown_config::Config;
use copydown_core::{Alignment, TableSection};
use copydown_pipeline::TABLE_SOURCE_ATTR;

/// Compose the fixed class name with a configured extra class.
fn class_attr(fixed: &str, extra: &str) -> String {
    if extra.is_empty() {
        fixed.to_string()
    } else {
        format!("{fixed} {extra}")
    }
}

/// Style attribute with leading space, or nothing for an empty style.
fn style_attr(style: &str) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html_attribute(style))
    }
}

/// Open the table container and the `<table>` tag.
///
/// `source` is the extracted markdown of this table, when the extraction
/// pass recovered one; without it the table renders identically except for
/// the missing data attribute.
pub fn open_table(out: &mut String, config: &Config, source: Option<&str>) {
    out.push_str("<div class=\"");
    out.push_str(&class_attr(CONTAINER_CLASS, &config.markup.container_class));
    out.push('"');
    out.push_str(&style_attr(&config.markup.container_style));
    out.push_str(">\n<table");
    if let Some(source) = source {
        out.push(' ');
        out.push_str(TABLE_SOURCE_ATTR);
        out.push_str("=\"");
        out.push_str(&escape_html_attribute(source));
        out.push('"');
    }
    out.push_str(">\n");
}

/// Render one row of cells as `<th>` or `<td>` elements.
pub fn render_row(out: &mut String, section: TableSection, cells: &[String], columns: &[Alignment]) {
    let tag = match section {
        TableSection::Header => "th",
        TableSection::Body => "td",
    };

    out.push_str("<tr>");
    for (i, cell) in cells.iter().enumerate() {
        match columns.get(i).and_then(Alignment::css) {
            Some(align) => {
                out.push_str(&format!("<{tag} style=\"text-align: {align}\">"));
            }
            None => {
                out.push_str(&format!("<{tag}>"));
            }
        }
        out.push_str(&render_inline(cell));
        out.push_str(&format!("</{tag}>"));
    }
    out.push_str("</tr>\n");
}

/// Close the `<table>` tag, emit the button bar, and close the container.
pub fn close_table(out: &mut String, config: &Config) {
    out.push_str("</table>\n");
    render_button_bar(out, config);
    out.push_str("</div>\n");
}

/// Emit the button bar div with the enabled copy buttons.
fn render_button_bar(out: &mut String, config: &Config) {
    out.push_str("<div class=\"");
    out.push_str(&class_attr(BUTTON_BAR_CLASS, &config.markup.button_bar_class));
    out.push('"');
    out.push_str(&style_attr(&config.markup.button_bar_style));
    out.push_str(">\n");

    if config.buttons.copy_md {
        render_button(out, config, CopyFormat::Md, &config.buttons.md_label);
    }
    if config.buttons.copy_csv {
        render_button(out, config, CopyFormat::Csv, &config.buttons.csv_label);
    }

    out.push_str("</div>\n");
}

/// Emit one copy button. The label is configured markup and inserted raw.
fn render_button(out: &mut String, config: &Config, format: CopyFormat, label: &str) {
    out.push_str("<button class=\"");
    out.push_str(&class_attr(COPY_BTN_CLASS, &config.markup.button_class));
    out.push_str(&format!("\" {}=\"{}\"", COPY_FORMAT_ATTR, format.as_attr()));
    out.push_str(&style_attr(&config.markup.button_style));
    out.push('>');
    out.push_str(label);
    out.push_str("</button>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_table_with_source() {
        let mut out = String::new();
        open_table(&mut out, &Config::default(), Some("| A |\n| - |"));

        assert!(out.starts_with("<div class=\"copydown-table\""));
        assert!(out.contains("style=\"display: grid; grid-template: auto;\""));
        assert!(out.contains("<table data-copydown-source=\"| A |&#10;| - |\">"));
    }

    #[test]
    fn test_open_table_without_source() {
        let mut out = String::new();
        open_table(&mut out, &Config::default(), None);
        assert!(out.contains("<table>"));
        assert!(!out.contains(TABLE_SOURCE_ATTR));
    }

    #[test]
    fn test_extra_container_class_appended() {
        let mut config = Config::default();
        config.markup.container_class = "prose".to_string();
        let mut out = String::new();
        open_table(&mut out, &config, None);
        assert!(out.contains("class=\"copydown-table prose\""));
    }

    #[test]
    fn test_render_row_header_and_body() {
        let mut out = String::new();
        render_row(
            &mut out,
            TableSection::Header,
            &["A".to_string(), "B".to_string()],
            &[],
        );
        assert_eq!(out, "<tr><th>A</th><th>B</th></tr>\n");

        let mut out = String::new();
        render_row(&mut out, TableSection::Body, &["1".to_string()], &[]);
        assert_eq!(out, "<tr><td>1</td></tr>\n");
    }

    #[test]
    fn test_render_row_alignment_styles() {
        let mut out = String::new();
        render_row(
            &mut out,
            TableSection::Body,
            &["l".to_string(), "c".to_string(), "n".to_string()],
            &[Alignment::Left, Alignment::Center, Alignment::None],
        );
        assert_eq!(
            out,
            "<tr><td style=\"text-align: left\">l</td>\
             <td style=\"text-align: center\">c</td><td>n</td></tr>\n"
        );
    }

    #[test]
    fn test_render_row_escapes_cells() {
        let mut out = String::new();
        render_row(
            &mut out,
            TableSection::Body,
            &["<b>&".to_string()],
            &[],
        );
        assert!(out.contains("&lt;b&gt;&amp;"));
    }

    #[test]
    fn test_close_table_buttons() {
        let mut out = String::new();
        close_table(&mut out, &Config::default());

        assert!(out.contains("</table>"));
        assert!(out.contains("class=\"copydown-table-buttons\""));
        assert!(out.contains("data-copydown-format=\"md\""));
        assert!(out.contains("data-copydown-format=\"csv\""));
        assert!(out.contains("<span>md</span>"));
        assert!(out.contains("<span>csv</span>"));
        assert!(out.ends_with("</div>\n"));
    }

    #[test]
    fn test_buttons_can_be_disabled() {
        let mut config = Config::default();
        config.buttons.copy_md = false;
        let mut out = String::new();
        close_table(&mut out, &config);

        assert!(!out.contains("data-copydown-format=\"md\""));
        assert!(out.contains("data-copydown-format=\"csv\""));
    }
}
