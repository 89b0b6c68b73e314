//! JSON output formatter for machine processing

use crate::domain::{DiffResult, VersionChange};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a diff
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Counts per category
    summary: JsonSummary,
    changed: &'a BTreeMap<String, VersionChange>,
    added: &'a BTreeMap<String, String>,
    removed: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct JsonSummary {
    changed: usize,
    added: usize,
    removed: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, diff: &DiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            summary: JsonSummary {
                changed: diff.changed_count(),
                added: diff.added_count(),
                removed: diff.removed_count(),
            },
            changed: &diff.changed,
            added: &diff.added,
            removed: &diff.removed,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
