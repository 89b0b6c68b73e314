//! Dependency group definitions for Pipfile.lock

use serde::{Deserialize, Serialize};

/// Dependency groups recorded in a Pipfile.lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyGroup {
    /// Runtime dependencies (`default`)
    Default,
    /// Development-only dependencies (`develop`)
    Develop,
}

impl DependencyGroup {
    /// Groups in processing order; later groups overwrite earlier ones
    pub const ALL: [DependencyGroup; 2] = [DependencyGroup::Default, DependencyGroup::Develop];

    /// Returns the JSON key of this group
    pub fn key(&self) -> &'static str {
        match self {
            DependencyGroup::Default => "default",
            DependencyGroup::Develop => "develop",
        }
    }
}
