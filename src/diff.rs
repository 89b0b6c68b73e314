//! Dependency diff engine
//!
//! Pure comparison of two dependency maps (base, head) into the added,
//! removed and changed categories. Descriptors are compared by exact
//! string equality.

use crate::domain::{DependencyMap, DiffResult, VersionChange};
use std::collections::BTreeMap;

/// Dependencies present in head but not in base
pub fn added(base: &DependencyMap, head: &DependencyMap) -> BTreeMap<String, String> {
    head.iter()
        .filter(|(name, _)| !base.contains(name))
        .map(|(name, version)| (name.to_string(), version.to_string()))
        .collect()
}

/// Dependencies present in base but not in head
pub fn removed(base: &DependencyMap, head: &DependencyMap) -> BTreeMap<String, String> {
    added(head, base)
}

/// Dependencies present in both with a different descriptor.
///
/// An empty base yields no changes regardless of head.
pub fn changed(base: &DependencyMap, head: &DependencyMap) -> BTreeMap<String, VersionChange> {
    if base.is_empty() {
        return BTreeMap::new();
    }

    base.iter()
        .filter_map(|(name, base_version)| {
            let head_version = head.get(name)?;
            (head_version != base_version)
                .then(|| (name.to_string(), VersionChange::new(base_version, head_version)))
        })
        .collect()
}

/// Compute all three categories at once
pub fn compute_diff(base: &DependencyMap, head: &DependencyMap) -> DiffResult {
    DiffResult {
        added: added(base, head),
        removed: removed(base, head),
        changed: changed(base, head),
    }
}
