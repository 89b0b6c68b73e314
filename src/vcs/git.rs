//! git CLI backed workspace

use crate::error::VcsError;
use crate::vcs::Workspace;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Default git executable
const GIT: &str = "git";

/// Workspace backed by a git checkout on disk
#[derive(Debug, Clone)]
pub struct GitWorkspace {
    /// Working tree root, used as the cwd of every git invocation
    root: PathBuf,
    /// git executable
    program: String,
}

impl GitWorkspace {
    /// Create a workspace rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: GIT.to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Render a command line for logs and errors
    fn command_line(&self, args: &[&str]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run git with `args`, returning trimmed stdout on success
    async fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let command = self.command_line(args);
        tracing::debug!(command = %command, cwd = %self.root.display(), "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| VcsError::spawn_failed(&command, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VcsError::command_failed(
                command,
                output.status.to_string(),
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Returns true if the repository has truncated history
    pub async fn is_shallow(&self) -> Result<bool, VcsError> {
        let out = self.run(&["rev-parse", "--is-shallow-repository"]).await?;
        Ok(out == "true")
    }
}

/// Arguments for fetching `branch` without tags
fn fetch_args<'a>(remote: &'a str, branch: &'a str, unshallow: bool) -> Vec<&'a str> {
    let mut args = vec!["fetch", remote, branch, "--no-tags", "--prune"];
    if unshallow {
        args.push("--unshallow");
    }
    args
}

#[async_trait]
impl Workspace for GitWorkspace {
    async fn fetch_history(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        let shallow = self.is_shallow().await?;
        self.run(&fetch_args(remote, branch, shallow)).await?;
        Ok(())
    }

    async fn checkout(&self, revision: &str) -> Result<(), VcsError> {
        self.run(&["checkout", "--quiet", revision]).await?;
        Ok(())
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
