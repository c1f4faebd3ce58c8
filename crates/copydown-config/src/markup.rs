//! Markup (class and inline style) configuration.

use serde::{Deserialize, Serialize};

/// Extra classes and inline styles applied to the generated table wrapper.
///
/// The fixed `copydown-table*` class names are always present; these values
/// are appended alongside them. Style strings are emitted verbatim into
/// `style="..."` attributes; empty strings emit nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarkupConfig {
    /// Extra class on the table container div.
    #[serde(default)]
    pub container_class: String,

    /// Inline style on the table container div.
    #[serde(default = "default_container_style")]
    pub container_style: String,

    /// Extra class on the button bar div.
    #[serde(default)]
    pub button_bar_class: String,

    /// Inline style on the button bar div.
    #[serde(default = "default_button_bar_style")]
    pub button_bar_style: String,

    /// Extra class on each copy button.
    #[serde(default)]
    pub button_class: String,

    /// Inline style on each copy button.
    #[serde(default)]
    pub button_style: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            container_class: String::new(),
            container_style: default_container_style(),
            button_bar_class: String::new(),
            button_bar_style: default_button_bar_style(),
            button_class: String::new(),
            button_style: String::new(),
        }
    }
}

impl MarkupConfig {
    /// Merge another MarkupConfig into this one.
    pub fn merge(&mut self, other: &MarkupConfig) {
        self.container_class = other.container_class.clone();
        self.container_style = other.container_style.clone();
        self.button_bar_class = other.button_bar_class.clone();
        self.button_bar_style = other.button_bar_style.clone();
        self.button_class = other.button_class.clone();
        self.button_style = other.button_style.clone();
    }
}

fn default_container_style() -> String {
    "display: grid; grid-template: auto;".to_string()
}

fn default_button_bar_style() -> String {
    "justify-self: end; align-self: end;".to_string()
}
