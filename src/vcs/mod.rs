//! Revision checkout abstraction
//!
//! The orchestrator only needs to fetch history, check out a revision and
//! then read files below a root directory. `GitWorkspace` does this with
//! the git CLI on a real working tree.

mod git;

pub use git::GitWorkspace;

use crate::error::VcsError;
use async_trait::async_trait;
use std::path::Path;

/// A working tree whose contents can be switched between revisions
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Fetch the full history of `branch` from `remote`
    async fn fetch_history(&self, remote: &str, branch: &str) -> Result<(), VcsError>;

    /// Switch the working tree to `revision`
    async fn checkout(&self, revision: &str) -> Result<(), VcsError>;

    /// Root directory holding the checked-out files
    fn root(&self) -> &Path;
}
