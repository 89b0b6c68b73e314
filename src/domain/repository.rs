//! Repository identifier in `owner/name` form

use crate::error::ConfigError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").unwrap());

/// Hosted repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    /// Owning user or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl Repository {
    /// Creates a new Repository
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SLUG_RE
            .captures(s.trim())
            .ok_or_else(|| ConfigError::InvalidRepository {
                value: s.to_string(),
            })?;
        Ok(Self::new(&caps[1], &caps[2]))
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
