//! Copydown Pipeline
//!
//! Post-parse transformation rules. A [`CoreRule`] runs once per document
//! over the full token stream, after parsing and before rendering; rules
//! annotate tokens through the document's side store rather than mutating
//! token shapes.
//!
//! # Example
//!
//! ```
//! use copydown_pipeline::{Ruler, SourceSpanExtractor};
//! use copydown_core::Document;
//!
//! let mut ruler = Ruler::new();
//! ruler.register(Box::new(SourceSpanExtractor));
//!
//! let mut doc = Document::new("| A |\n| - |", vec![]);
//! ruler.run(&mut doc);
//! ```

pub mod source_span;

pub use source_span::{SourceSpanExtractor, TABLE_SOURCE_ATTR};

use copydown_core::Document;

/// A transformation rule run once per parsed document.
///
/// Rules must be stateless with respect to the document: everything they
/// read or write lives in the [`Document`] they are handed, so one rule
/// instance can process any number of documents, concurrently or not.
pub trait CoreRule: Send + Sync {
    /// Rule name for identification and logging.
    fn name(&self) -> &str;

    /// Run the rule over the document.
    fn run(&self, doc: &mut Document);

    /// Rule priority (lower = earlier).
    fn priority(&self) -> i32 {
        0
    }
}

/// Ordered registry of pipeline rules.
///
/// Rules run in priority order; ties run in registration order.
#[derive(Default)]
pub struct Ruler {
    rules: Vec<Box<dyn CoreRule>>,
}

impl Ruler {
    /// Create an empty ruler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ruler with the built-in rules registered.
    pub fn with_defaults() -> Self {
        let mut ruler = Self::new();
        ruler.register(Box::new(SourceSpanExtractor));
        ruler
    }

    /// Register a rule, keeping the ordering sorted by priority.
    pub fn register(&mut self, rule: Box<dyn CoreRule>) {
        self.rules.push(rule);
        self.rules.sort_by_key(|r| r.priority());
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule over the document, in order.
    pub fn run(&self, doc: &mut Document) {
        for rule in &self.rules {
            log::trace!("running pipeline rule {}", rule.name());
            rule.run(doc);
        }
    }
}
