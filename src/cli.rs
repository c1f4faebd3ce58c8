//! Command-line interface for Copydown.

use clap::Parser;
use std::path::PathBuf;

/// Copydown - markdown to HTML with copyable tables.
///
/// Renders markdown where every table carries its original source text and
/// copy buttons for Markdown and CSV payloads.
#[derive(Parser, Debug)]
#[command(
    name = "cpd",
    author = "Copydown Contributors",
    version,
    about = "Render markdown to HTML with copyable tables",
    after_help = "Examples:\n  \
                  cat README.md | cpd\n  \
                  cpd document.md -o document.html\n  \
                  cpd --csv table.md\n  \
                  cpd -c theme.toml --no-md input.md"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Convert a bare markdown table to CSV instead of rendering HTML
    #[arg(long = "csv")]
    pub csv: bool,

    /// Skip the markdown copy button
    #[arg(long = "no-md")]
    pub no_md: bool,

    /// Skip the CSV copy button
    #[arg(long = "no-csv")]
    pub no_csv: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }
}

/// Show paths information.
pub fn show_paths() {
    use copydown_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
