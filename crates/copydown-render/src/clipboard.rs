//! Copy-action dispatch.
//!
//! The presentation layer owns a [`CopyDispatcher`]: handlers are registered
//! against CSS selectors at startup and torn down with
//! [`CopyDispatcher::clear`], so clipboard wiring has an owner and a
//! lifecycle instead of living in module state. Dispatch is synchronous
//! and always yields a string; a failed lookup yields the [`NOT_FOUND`]
//! sentinel, never an error.

use crate::COPY_BTN_CLASS;
use copydown_csv::markdown_table_to_csv;

/// Sentinel returned when a copy action cannot resolve its payload.
pub const NOT_FOUND: &str = "not found";

/// Payload format requested by a copy action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyFormat {
    /// Original markdown table text
    Md,
    /// RFC 4180 CSV conversion
    Csv,
}

impl CopyFormat {
    /// Attribute value identifying this format on a copy button.
    pub fn as_attr(&self) -> &'static str {
        match self {
            CopyFormat::Md => "md",
            CopyFormat::Csv => "csv",
        }
    }

    /// Parse a format attribute value.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "md" => Some(CopyFormat::Md),
            "csv" => Some(CopyFormat::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for CopyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_attr())
    }
}

/// One copy action, resolved by the presentation layer from the clicked
/// button's format attribute and the nearest table's source attribute.
#[derive(Debug, Clone, Copy)]
pub struct CopyRequest<'a> {
    /// Requested payload format
    pub format: CopyFormat,
    /// The table's extracted source, when the lookup found one
    pub table_source: Option<&'a str>,
}

/// Handler producing a copy payload for a request.
pub type CopyHandler = Box<dyn Fn(&CopyRequest) -> String + Send + Sync>;

/// Compute the copy payload for a table copy request.
///
/// CSV conversion happens here and only here: lazily, per copy action,
/// never on the render path.
pub fn table_copy_payload(request: &CopyRequest) -> String {
    match request.table_source {
        None => NOT_FOUND.to_string(),
        Some(source) => match request.format {
            CopyFormat::Md => source.to_string(),
            CopyFormat::Csv => markdown_table_to_csv(source),
        },
    }
}

/// Selector-keyed registry of copy handlers.
pub struct CopyDispatcher {
    handlers: Vec<(String, CopyHandler)>,
}

impl Default for CopyDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Create a dispatcher with the table copy handler registered under
    /// the copy button selector.
    pub fn with_table_copy() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(
            &format!(".{COPY_BTN_CLASS}"),
            Box::new(|request| table_copy_payload(request)),
        );
        dispatcher
    }

    /// Register a handler for a selector, replacing any previous handler
    /// registered under the same selector.
    pub fn register(&mut self, selector: &str, handler: CopyHandler) {
        match self.handlers.iter_mut().find(|(s, _)| s == selector) {
            Some(entry) => entry.1 = handler,
            None => self.handlers.push((selector.to_string(), handler)),
        }
    }

    /// Remove the handler for a selector. Returns whether one was removed.
    pub fn unregister(&mut self, selector: &str) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _)| s != selector);
        self.handlers.len() != before
    }

    /// Remove all handlers.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Registered selectors, in registration order.
    pub fn selectors(&self) -> Vec<&str> {
        self.handlers.iter().map(|(s, _)| s.as_str()).collect()
    }

    /// Dispatch a copy action to the handler for `selector`.
    ///
    /// Always returns a payload string; an unknown selector yields the
    /// [`NOT_FOUND`] sentinel so the user-facing action still produces
    /// something.
    pub fn dispatch(&self, selector: &str, request: &CopyRequest) -> String {
        match self.handlers.iter().find(|(s, _)| s == selector) {
            Some((_, handler)) => handler(request),
            None => {
                log::warn!("no copy handler registered for selector {selector}");
                NOT_FOUND.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "| A | B |\n| - | - |\n| 1 | 2 |";

    fn btn_selector() -> String {
        format!(".{COPY_BTN_CLASS}")
    }

    #[test]
    fn test_copy_format_attrs() {
        assert_eq!(CopyFormat::Md.as_attr(), "md");
        assert_eq!(CopyFormat::Csv.as_attr(), "csv");
        assert_eq!(CopyFormat::from_attr("md"), Some(CopyFormat::Md));
        assert_eq!(CopyFormat::from_attr("csv"), Some(CopyFormat::Csv));
        assert_eq!(CopyFormat::from_attr("tsv"), None);
    }

    #[test]
    fn test_payload_md_returns_source_verbatim() {
        let request = CopyRequest {
            format: CopyFormat::Md,
            table_source: Some(TABLE),
        };
        assert_eq!(table_copy_payload(&request), TABLE);
    }

    #[test]
    fn test_payload_csv_converts_lazily() {
        let request = CopyRequest {
            format: CopyFormat::Csv,
            table_source: Some(TABLE),
        };
        assert_eq!(table_copy_payload(&request), "A,B\n1,2");
    }

    #[test]
    fn test_payload_missing_source_is_sentinel() {
        for format in [CopyFormat::Md, CopyFormat::Csv] {
            let request = CopyRequest {
                format,
                table_source: None,
            };
            assert_eq!(table_copy_payload(&request), NOT_FOUND);
        }
    }

    #[test]
    fn test_dispatcher_with_table_copy() {
        let dispatcher = CopyDispatcher::with_table_copy();
        assert_eq!(dispatcher.handler_count(), 1);
        assert_eq!(dispatcher.selectors(), vec![btn_selector().as_str()]);

        let payload = dispatcher.dispatch(
            &btn_selector(),
            &CopyRequest {
                format: CopyFormat::Csv,
                table_source: Some(TABLE),
            },
        );
        assert_eq!(payload, "A,B\n1,2");
    }

    #[test]
    fn test_dispatch_unknown_selector_is_sentinel() {
        let dispatcher = CopyDispatcher::with_table_copy();
        let payload = dispatcher.dispatch(
            ".elsewhere",
            &CopyRequest {
                format: CopyFormat::Md,
                table_source: Some(TABLE),
            },
        );
        assert_eq!(payload, NOT_FOUND);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut dispatcher = CopyDispatcher::new();
        dispatcher.register(".x", Box::new(|_| "first".to_string()));
        dispatcher.register(".x", Box::new(|_| "second".to_string()));
        assert_eq!(dispatcher.handler_count(), 1);

        let request = CopyRequest {
            format: CopyFormat::Md,
            table_source: None,
        };
        assert_eq!(dispatcher.dispatch(".x", &request), "second");
    }

    #[test]
    fn test_unregister_and_clear() {
        let mut dispatcher = CopyDispatcher::with_table_copy();
        assert!(dispatcher.unregister(&btn_selector()));
        assert!(!dispatcher.unregister(&btn_selector()));
        assert_eq!(dispatcher.handler_count(), 0);

        dispatcher.register(".a", Box::new(|_| String::new()));
        dispatcher.register(".b", Box::new(|_| String::new()));
        dispatcher.clear();
        assert_eq!(dispatcher.handler_count(), 0);
    }
}
