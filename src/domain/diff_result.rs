//! Diff result types
//!
//! Provides the three derived mappings produced by comparing two
//! dependency maps: added, removed and changed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A version descriptor that differs between base and head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    /// Descriptor on the base revision
    pub base: String,
    /// Descriptor on the head revision
    pub head: String,
}

impl VersionChange {
    /// Creates a new VersionChange
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: head.into(),
        }
    }
}

/// Dependency changes between two revisions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Present only in head
    pub added: BTreeMap<String, String>,
    /// Present only in base
    pub removed: BTreeMap<String, String>,
    /// Present in both with differing descriptors
    pub changed: BTreeMap<String, VersionChange>,
}

impl DiffResult {
    /// Returns true if no category holds any entry
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Returns the number of added dependencies
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Returns the number of removed dependencies
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Returns the number of changed dependencies
    pub fn changed_count(&self) -> usize {
        self.changed.len()
    }
}
