//! Pipfile.lock parser
//!
//! Handles:
//! - `default` and `develop` groups, merged with `develop` overwriting
//! - Registry pins (`"version": "==1.2.3"`)
//! - VCS pins (`"ref": "<sha>"`), shortened to 7 characters

use crate::domain::{DependencyGroup, DependencyMap};
use crate::error::LockfileError;
use crate::lockfile::LockfileParser;
use serde_json::{Map, Value};

/// Conventional lockfile name, relative to the project root
pub const PIPFILE_LOCK: &str = "Pipfile.lock";

/// Length of the commit prefix used for VCS dependencies
const SHORT_REF_LEN: usize = 7;

/// Parser for Pipfile.lock files
pub struct PipfileLockParser;

impl LockfileParser for PipfileLockParser {
    fn parse(&self, content: &str) -> Result<DependencyMap, LockfileError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| LockfileError::json_parse_error(PIPFILE_LOCK, e.to_string()))?;

        let mut deps = DependencyMap::new();

        for group in DependencyGroup::ALL {
            let entries = json
                .get(group.key())
                .and_then(|v| v.as_object())
                .ok_or_else(|| LockfileError::missing_group(PIPFILE_LOCK, group.key()))?;
            parse_group(entries, &mut deps)?;
        }

        Ok(deps)
    }
}

fn parse_group(
    entries: &Map<String, Value>,
    output: &mut DependencyMap,
) -> Result<(), LockfileError> {
    for (name, meta) in entries {
        let descriptor = version_descriptor(meta)
            .ok_or_else(|| LockfileError::missing_version(PIPFILE_LOCK, name))?;
        output.insert(name.clone(), descriptor);
    }
    Ok(())
}

/// Extract the version descriptor of a single entry.
///
/// `version` takes precedence over `ref`.
fn version_descriptor(meta: &Value) -> Option<String> {
    if let Some(version) = meta.get("version") {
        let version = match version.as_str() {
            Some(s) => s.to_string(),
            None => version.to_string(),
        };
        return Some(
            version
                .strip_prefix("==")
                .map(str::to_string)
                .unwrap_or(version),
        );
    }

    meta.get("ref")
        .and_then(|r| r.as_str())
        .map(|r| r.chars().take(SHORT_REF_LEN).collect())
}
