//! Lockfile reading and parsing
//!
//! This module provides functionality to:
//! - Read a lockfile from a checked-out working tree
//! - Parse it into a flat dependency name → version descriptor map

mod pipfile_lock;

pub use pipfile_lock::{PipfileLockParser, PIPFILE_LOCK};

use crate::domain::DependencyMap;
use crate::error::LockfileError;
use std::path::Path;

/// Trait for parsing lockfiles
pub trait LockfileParser {
    /// Parse dependencies from lockfile content
    fn parse(&self, content: &str) -> Result<DependencyMap, LockfileError>;
}

/// Read and parse the lockfile at `path`
pub fn read_lockfile(
    path: &Path,
    parser: &dyn LockfileParser,
) -> Result<DependencyMap, LockfileError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LockfileError::not_found(path)
        } else {
            LockfileError::read_error(path, e)
        }
    })?;

    parser.parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_lockfile() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Pipfile.lock"),
            r#"{"default": {"six": {"version": "==1.16.0"}}, "develop": {}}"#,
        )
        .unwrap();

        let deps = read_lockfile(&dir.path().join("Pipfile.lock"), &PipfileLockParser).unwrap();
        assert_eq!(deps.get("six"), Some("1.16.0"));
    }

    #[test]
    fn test_read_lockfile_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_lockfile(&dir.path().join("Pipfile.lock"), &PipfileLockParser).unwrap_err();
        assert!(matches!(err, LockfileError::NotFound { .. }));
    }
}
