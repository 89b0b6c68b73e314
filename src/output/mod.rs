//! Output formatting for dependency diffs
//!
//! This module provides:
//! - Markdown output used as the pull request comment body
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod markdown;
mod text;

pub use json::JsonFormatter;
pub use markdown::{is_managed_comment, render_message, MarkdownFormatter, COMMENT_MARKER};
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::DiffResult;
use clap::ValueEnum;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// The exact pull request comment body
    Markdown,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

impl Verbosity {
    /// Derive the verbosity from CLI flags
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Configuration for output formatting
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output format (text, markdown, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self { format, verbosity }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(format: OutputFormat, verbose: bool, quiet: bool) -> Self {
        Self::new(format, Verbosity::from_flags(verbose, quiet))
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a dependency diff
    fn format(&self, diff: &DiffResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config.verbosity)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
