//! Copy button configuration.

use serde::{Deserialize, Serialize};

/// Which copy buttons are rendered and what they say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ButtonsConfig {
    /// Render the markdown copy button.
    /// Default: true
    #[serde(default = "default_true")]
    pub copy_md: bool,

    /// Render the CSV copy button.
    /// Default: true
    #[serde(default = "default_true")]
    pub copy_csv: bool,

    /// Inner HTML of the markdown copy button.
    #[serde(default = "default_md_label")]
    pub md_label: String,

    /// Inner HTML of the CSV copy button.
    #[serde(default = "default_csv_label")]
    pub csv_label: String,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            copy_md: true,
            copy_csv: true,
            md_label: default_md_label(),
            csv_label: default_csv_label(),
        }
    }
}

impl ButtonsConfig {
    /// Merge another ButtonsConfig into this one.
    ///
    /// TOML cannot distinguish "not set" from "set to default", so the
    /// override file carries only the values the user wants to change and
    /// every field is copied.
    pub fn merge(&mut self, other: &ButtonsConfig) {
        self.copy_md = other.copy_md;
        self.copy_csv = other.copy_csv;
        self.md_label = other.md_label.clone();
        self.csv_label = other.csv_label.clone();
    }
}

fn default_true() -> bool {
    true
}

fn default_md_label() -> String {
    "<span>md</span>".to_string()
}

fn default_csv_label() -> String {
    "<span>csv</span>".to_string()
}
