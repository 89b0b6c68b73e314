//! Orchestrator for coordinating the comment workflow
//!
//! This module provides:
//! - Workflow coordination: fetch → checkout/parse base → checkout/parse head
//!   → diff → render → upsert
//! - Short-circuit when both revisions resolve to the same dependencies
//! - Dry-run mode that stops before any API call
//!
//! Every step is awaited in order against a single working tree; any error
//! aborts the run before a comment is touched.

use crate::config::RunConfig;
use crate::diff::compute_diff;
use crate::domain::{DependencyMap, DiffResult};
use crate::error::{AppError, ConfigError};
use crate::github::{upsert_comment, CommentApi, UpsertOutcome};
use crate::lockfile::{read_lockfile, LockfileParser, PipfileLockParser};
use crate::output::render_message;
use crate::progress::Progress;
use crate::vcs::Workspace;
use std::fmt;
use tracing::info;

/// Workflow stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching base branch history
    FetchingHistory,
    /// Base revision checked out
    CheckedOutBase,
    /// Base lockfile parsed
    ParsedBase,
    /// Head revision checked out
    CheckedOutHead,
    /// Head lockfile parsed
    ParsedHead,
    /// Both revisions have identical dependencies (terminal)
    Unchanged,
    /// Diff computed
    Diffed,
    /// Comment body rendered
    Rendered,
    /// Comment created or edited (terminal)
    Posted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FetchingHistory => "fetching-history",
            Stage::CheckedOutBase => "checked-out-base",
            Stage::ParsedBase => "parsed-base",
            Stage::CheckedOutHead => "checked-out-head",
            Stage::ParsedHead => "parsed-head",
            Stage::Unchanged => "unchanged",
            Stage::Diffed => "diffed",
            Stage::Rendered => "rendered",
            Stage::Posted => "posted",
        };
        f.write_str(name)
    }
}

/// Result of running the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Base and head dependencies are identical; nothing was rendered or posted
    Unchanged,
    /// Diff rendered but not posted
    DryRun {
        /// Dependency changes
        diff: DiffResult,
        /// Rendered comment body
        message: String,
    },
    /// Diff rendered and the managed comment upserted
    Posted {
        /// Dependency changes
        diff: DiffResult,
        /// Rendered comment body
        message: String,
        /// Whether the comment was created or edited
        outcome: UpsertOutcome,
    },
}

impl RunOutcome {
    /// Returns the diff, if one was computed
    pub fn diff(&self) -> Option<&DiffResult> {
        match self {
            RunOutcome::Unchanged => None,
            RunOutcome::DryRun { diff, .. } | RunOutcome::Posted { diff, .. } => Some(diff),
        }
    }

    /// Returns the rendered message, if one was produced
    pub fn message(&self) -> Option<&str> {
        match self {
            RunOutcome::Unchanged => None,
            RunOutcome::DryRun { message, .. } | RunOutcome::Posted { message, .. } => {
                Some(message)
            }
        }
    }
}

/// Orchestrator for coordinating the comment workflow
pub struct Orchestrator<'a> {
    /// Run settings
    config: RunConfig,
    /// Working tree switched between base and head
    workspace: &'a dyn Workspace,
    /// Comment backend; unused in dry-run mode
    api: Option<&'a dyn CommentApi>,
    /// Lockfile format
    parser: Box<dyn LockfileParser + Send + Sync>,
    /// Whether to show spinners
    show_progress: bool,
}

impl<'a> Orchestrator<'a> {
    /// Create a new orchestrator reading Pipfile.lock files
    pub fn new(
        config: RunConfig,
        workspace: &'a dyn Workspace,
        api: Option<&'a dyn CommentApi>,
    ) -> Self {
        Self {
            config,
            workspace,
            api,
            parser: Box::new(PipfileLockParser),
            show_progress: false,
        }
    }

    /// Enable or disable spinners
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the workflow
    pub async fn run(&self) -> Result<RunOutcome, AppError> {
        let mut progress = Progress::new(self.show_progress);

        if let Some(branch) = &self.config.base_ref {
            info!(
                stage = %Stage::FetchingHistory,
                remote = %self.config.remote,
                branch = %branch,
                "fetching full history"
            );
            progress.spinner(&format!("Fetching {}/{}", self.config.remote, branch));
            let fetched = self
                .workspace
                .fetch_history(&self.config.remote, branch)
                .await;
            progress.finish_and_clear();
            fetched?;
        }

        let base_deps = self
            .load_revision(
                &self.config.base_sha,
                Stage::CheckedOutBase,
                Stage::ParsedBase,
                &mut progress,
            )
            .await?;
        let head_deps = self
            .load_revision(
                &self.config.head_sha,
                Stage::CheckedOutHead,
                Stage::ParsedHead,
                &mut progress,
            )
            .await?;

        if base_deps == head_deps {
            info!(stage = %Stage::Unchanged, "No dependency changes.");
            return Ok(RunOutcome::Unchanged);
        }

        let diff = compute_diff(&base_deps, &head_deps);
        info!(
            stage = %Stage::Diffed,
            changed = diff.changed_count(),
            added = diff.added_count(),
            removed = diff.removed_count(),
            "computed dependency diff"
        );

        let message = render_message(&diff);
        tracing::debug!(stage = %Stage::Rendered, bytes = message.len(), "rendered comment");

        if self.config.dry_run {
            info!("dry run: not posting comment");
            return Ok(RunOutcome::DryRun { diff, message });
        }

        let outcome = self.post(&message, &mut progress).await?;
        info!(stage = %Stage::Posted, comment_id = outcome.comment_id(), "{}", outcome);

        Ok(RunOutcome::Posted {
            diff,
            message,
            outcome,
        })
    }

    /// Check out `revision` and parse its lockfile
    async fn load_revision(
        &self,
        revision: &str,
        checked_out: Stage,
        parsed: Stage,
        progress: &mut Progress,
    ) -> Result<DependencyMap, AppError> {
        progress.spinner(&format!("Checking out {}", revision));
        let result = self.workspace.checkout(revision).await;
        progress.finish_and_clear();
        result?;
        info!(stage = %checked_out, revision, "checked out revision");

        let path = self.workspace.root().join(&self.config.lockfile);
        let deps = read_lockfile(&path, self.parser.as_ref())?;
        info!(stage = %parsed, revision, dependencies = deps.len(), "parsed lockfile");

        Ok(deps)
    }

    /// Upsert the managed comment
    async fn post(
        &self,
        message: &str,
        progress: &mut Progress,
    ) -> Result<UpsertOutcome, AppError> {
        let target = self.config.target.as_ref().ok_or_else(|| {
            ConfigError::missing(
                "pull request number",
                "--pr-number/--event-path",
                "GITHUB_EVENT_PATH",
            )
        })?;
        let api = self
            .api
            .ok_or_else(|| ConfigError::missing("API token", "--token", "INPUT_REPO-TOKEN"))?;

        progress.spinner(&format!("Updating comment on #{}", target.pr_number));
        let result = upsert_comment(api, target.pr_number, message).await;
        progress.finish_and_clear();

        Ok(result?)
    }
}
