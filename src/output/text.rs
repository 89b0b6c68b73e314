//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Colored changed/added/removed listing
//! - Semantic version change type indication (major/minor/patch)
//! - Summary line with per-category counts

use crate::domain::DiffResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable, e.g. VCS commit prefixes
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        let parse = |v: &str| -> Option<(u64, u64)> {
            let mut parts = v.split(['.', '-', '+']);
            let major = parts.next()?.parse().ok()?;
            let minor = parts.next().map(|p| p.parse().ok()).unwrap_or(Some(0))?;
            Some((major, minor))
        };

        match (parse(old), parse(new)) {
            (Some((old_major, old_minor)), Some((new_major, new_minor))) => {
                if new_major != old_major {
                    VersionChangeType::Major
                } else if new_minor != old_minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => self.label().red().bold().to_string(),
            VersionChangeType::Minor => self.label().yellow().to_string(),
            VersionChangeType::Patch => self.label().green().to_string(),
            VersionChangeType::Unknown => self.label().dimmed().to_string(),
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn heading(&self, title: &str, count: usize) -> String {
        let text = format!("{} ({})", title, count);
        if self.color {
            text.bold().to_string()
        } else {
            text
        }
    }

    fn marker(&self, symbol: &str) -> String {
        if !self.color {
            return symbol.to_string();
        }
        match symbol {
            "+" => symbol.green().to_string(),
            "-" => symbol.red().to_string(),
            _ => symbol.yellow().to_string(),
        }
    }

    fn write_summary(&self, diff: &DiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "{} changed, {} added, {} removed",
            diff.changed_count(),
            diff.added_count(),
            diff.removed_count()
        )
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, diff: &DiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if diff.is_empty() {
            writeln!(writer, "No dependency changes.")?;
            return Ok(());
        }

        if self.verbosity == Verbosity::Quiet {
            return self.write_summary(diff, writer);
        }

        let width = diff
            .changed
            .keys()
            .chain(diff.added.keys())
            .chain(diff.removed.keys())
            .map(|name| name.len())
            .max()
            .unwrap_or(0);

        if !diff.changed.is_empty() {
            writeln!(writer, "{}", self.heading("Changed", diff.changed_count()))?;
            for (name, change) in &diff.changed {
                let kind = VersionChangeType::from_versions(&change.base, &change.head);
                let label = if self.color {
                    kind.colored_label()
                } else {
                    kind.label().to_string()
                };
                writeln!(
                    writer,
                    "  {} {:width$} {} => {} [{}]",
                    self.marker("~"),
                    name,
                    change.base,
                    change.head,
                    label,
                    width = width
                )?;
            }
        }

        for (title, symbol, entries) in [
            ("Added", "+", &diff.added),
            ("Removed", "-", &diff.removed),
        ] {
            if entries.is_empty() {
                continue;
            }
            writeln!(writer, "{}", self.heading(title, entries.len()))?;
            for (name, version) in entries {
                writeln!(
                    writer,
                    "  {} {:width$} {}",
                    self.marker(symbol),
                    name,
                    version,
                    width = width
                )?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer)?;
            self.write_summary(diff, writer)?;
        }

        Ok(())
    }
}
