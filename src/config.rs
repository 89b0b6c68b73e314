//! Run configuration
//!
//! This module provides:
//! - `RunConfig`, the explicit settings handed to the orchestrator
//! - CI event payload loading for the pull request number
//! - Validation of required settings per mode (dry run vs posting)

use crate::cli::CliArgs;
use crate::domain::Repository;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Minimal view of a pull request event payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventPayload {
    /// Pull request number
    pub number: u64,
}

impl EventPayload {
    /// Read and parse the payload at `path`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::event_payload(path, e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::event_payload(path, e.to_string()))
    }
}

/// Where and how to publish the comment
#[derive(Debug, Clone)]
pub struct PostTarget {
    /// Repository hosting the pull request
    pub repository: Repository,
    /// Pull request number
    pub pr_number: u64,
    /// API credential
    pub token: String,
    /// API base URL
    pub api_url: String,
    /// HTTP timeout
    pub timeout: Duration,
    /// Retries for transport errors and rate limiting
    pub max_retries: u32,
}

/// Settings for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Working tree root
    pub root: PathBuf,
    /// Lockfile path relative to `root`
    pub lockfile: PathBuf,
    /// Remote to fetch from
    pub remote: String,
    /// Branch fetched with full history; `None` skips the fetch
    pub base_ref: Option<String>,
    /// Base revision
    pub base_sha: String,
    /// Head revision
    pub head_sha: String,
    /// Compute the diff without posting
    pub dry_run: bool,
    /// Publishing settings; always present unless `dry_run`
    pub target: Option<PostTarget>,
}

impl RunConfig {
    /// Build the configuration from CLI arguments (flags and environment)
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let base_sha = required(
            args.base_sha.clone(),
            "base revision",
            "--base-sha",
            "INPUT_BASE-SHA",
        )?;
        let head_sha = required(
            args.head_sha.clone(),
            "head revision",
            "--head-sha",
            "INPUT_HEAD-SHA",
        )?;

        let base_ref = if args.no_fetch {
            None
        } else {
            Some(required(
                args.base_ref.clone(),
                "base branch",
                "--base-ref",
                "GITHUB_BASE_REF",
            )?)
        };

        let target = if args.dry_run {
            None
        } else {
            Some(Self::post_target(args)?)
        };

        Ok(Self {
            root: args.path.clone(),
            lockfile: args.lockfile.clone(),
            remote: args.remote.clone(),
            base_ref,
            base_sha,
            head_sha,
            dry_run: args.dry_run,
            target,
        })
    }

    fn post_target(args: &CliArgs) -> Result<PostTarget, ConfigError> {
        let repository: Repository = required(
            args.repository.clone(),
            "repository",
            "--repository",
            "GITHUB_REPOSITORY",
        )?
        .parse()?;
        let token = required(args.token.clone(), "API token", "--token", "INPUT_REPO-TOKEN")?;

        let pr_number = match (args.pr_number, &args.event_path) {
            (Some(number), _) => number,
            (None, Some(path)) => EventPayload::from_file(path)?.number,
            (None, None) => {
                return Err(ConfigError::missing(
                    "pull request number",
                    "--pr-number/--event-path",
                    "GITHUB_EVENT_PATH",
                ))
            }
        };

        Ok(PostTarget {
            repository,
            pr_number,
            token,
            api_url: args.api_url.clone(),
            timeout: args.timeout,
            max_retries: args.max_retries,
        })
    }
}

/// Treat absent and blank values alike
fn required(
    value: Option<String>,
    name: &str,
    flag: &str,
    env: &str,
) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::missing(name, flag, env))
}
