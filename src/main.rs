//! Copydown - markdown to HTML with copyable tables.
//!
//! This binary wires the copydown pipeline together: parse markdown into
//! tokens, run the table source extraction pass, and render HTML whose
//! tables carry their original source and copy buttons.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use copydown_config::Config;
use copydown_core::Result;
use copydown_csv::markdown_table_to_csv;
use copydown_parser::Parser as MarkdownParser;
use copydown_pipeline::Ruler;
use copydown_render::Renderer;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    // Set up logging
    setup_logging(&cli.log_level);
    info!("Copydown v{}", env!("CARGO_PKG_VERSION"));

    // Run the main application
    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let input = read_input(cli)?;

    let output = if cli.csv {
        markdown_table_to_csv(&input)
    } else {
        let config = load_config(cli)?;
        render_document(&input, &config)
    };

    write_output(cli, &output)
}

/// Parse, run the pipeline rules, and render one document.
fn render_document(src: &str, config: &Config) -> String {
    let mut doc = MarkdownParser::parse_document(src);

    let ruler = Ruler::with_defaults();
    ruler.run(&mut doc);
    debug!(
        "pipeline annotated {} token(s)",
        doc.annotations.annotated_tokens()
    );

    Renderer::new(config).render(&doc)
}

/// Load configuration with optional overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load().unwrap_or_default();

    // Apply config override if provided
    if let Some(config_arg) = &cli.config {
        if Path::new(config_arg).exists() {
            // It's a file path
            match Config::load_from(Path::new(config_arg)) {
                Ok(override_config) => {
                    config.merge(&override_config);
                    debug!("Merged config from file: {}", config_arg);
                }
                Err(e) => {
                    error!("Failed to load config file {}: {}", config_arg, e);
                }
            }
        } else {
            // Try parsing as inline TOML
            match Config::parse(config_arg) {
                Ok(override_config) => {
                    config.merge(&override_config);
                    debug!("Merged inline config");
                }
                Err(e) => {
                    error!("Failed to parse config: {}", e);
                }
            }
        }
    }

    if cli.no_md {
        config.buttons.copy_md = false;
    }
    if cli.no_csv {
        config.buttons.copy_csv = false;
    }

    Ok(config)
}

/// Read from stdin or concatenate the input files.
fn read_input(cli: &Cli) -> Result<String> {
    if cli.should_read_stdin() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        let mut parts = Vec::with_capacity(cli.files.len());
        for path in &cli.files {
            debug!("reading {}", path.display());
            parts.push(fs::read_to_string(path)?);
        }
        Ok(parts.join("\n"))
    }
}

/// Write to the output file or stdout.
fn write_output(cli: &Cli, content: &str) -> Result<()> {
    match &cli.output {
        Some(path) => {
            fs::write(path, content)?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(content.as_bytes())?;
            if !content.is_empty() && !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
