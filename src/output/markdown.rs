//! Markdown formatter producing the pull request comment body
//!
//! The first line is a hidden HTML marker used to find the comment again
//! on later runs, so it must never change.

use crate::domain::DiffResult;
use crate::lockfile::PIPFILE_LOCK;
use crate::output::OutputFormatter;
use std::collections::BTreeSet;
use std::io::Write;

/// Leading line identifying a comment managed by this tool
pub const COMMENT_MARKER: &str = "<!-- pipfile-diff -->";

/// Formatter for the pull request comment body
#[derive(Debug, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    /// Write one fenced section; lines are deduplicated and sorted
    fn write_section(
        &self,
        title: &str,
        lines: BTreeSet<String>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let body = lines.into_iter().collect::<Vec<_>>().join("\n");
        writeln!(writer, "**{}**", title)?;
        writeln!(writer, "```")?;
        writeln!(writer, "{}", body.trim())?;
        writeln!(writer, "```")?;
        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, diff: &DiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", COMMENT_MARKER)?;
        writeln!(writer)?;
        writeln!(writer, "Dependency changes from `{}`:", PIPFILE_LOCK)?;
        writeln!(writer)?;

        if !diff.changed.is_empty() {
            let lines = diff
                .changed
                .iter()
                .map(|(name, change)| format!("{} {} => {}", name, change.base, change.head))
                .collect();
            self.write_section("Changed", lines, writer)?;
        }

        if !diff.added.is_empty() {
            let lines = diff
                .added
                .iter()
                .map(|(name, version)| format!("{}=={}", name, version))
                .collect();
            self.write_section("Added", lines, writer)?;
        }

        if !diff.removed.is_empty() {
            let lines = diff
                .removed
                .iter()
                .map(|(name, version)| format!("{}=={}", name, version))
                .collect();
            self.write_section("Removed", lines, writer)?;
        }

        Ok(())
    }
}

/// Render the comment body for a diff
pub fn render_message(diff: &DiffResult) -> String {
    let mut buf = Vec::new();
    MarkdownFormatter
        .format(diff, &mut buf)
        .expect("writing to Vec<u8> cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Returns true if a comment body was produced by this tool
pub fn is_managed_comment(body: &str) -> bool {
    body.starts_with(COMMENT_MARKER)
}
