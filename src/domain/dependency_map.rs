//! Dependency name to version descriptor mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from dependency name to version descriptor.
///
/// A version descriptor is either a bare version string or, for
/// dependencies pinned to a VCS ref, a 7 character commit prefix. It is
/// treated as an opaque string everywhere downstream of the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMap(BTreeMap<String, String>);

impl DependencyMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a dependency, replacing any earlier descriptor for the same name
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), version.into())
    }

    /// Returns the descriptor recorded for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns true if `name` is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of dependencies
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no dependency is recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, version)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = DependencyMap::new();
        for (name, version) in iter {
            map.insert(name, version);
        }
        map
    }
}
