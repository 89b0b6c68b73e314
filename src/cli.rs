//! CLI argument parsing module for lockdiff
//!
//! Every setting a CI action passes through the environment is also
//! available as a flag, so the same binary can be run by hand.

use crate::github::DEFAULT_API_URL;
use crate::lockfile::PIPFILE_LOCK;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse timeout string in format: N (seconds), Ns (seconds), Nm (minutes)
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout string".to_string());
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else {
        (s, 1)
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in timeout: {}", num_str))?;

    if num == 0 {
        return Err("timeout must be greater than zero".to_string());
    }

    Ok(Duration::from_secs(num * multiplier))
}

/// Comment Pipfile.lock dependency changes on a pull request
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lockdiff",
    version,
    about = "Comment Pipfile.lock dependency changes on a pull request"
)]
pub struct CliArgs {
    /// Working tree to check revisions out in (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Revisions
    /// Base branch whose full history is fetched before checkout
    #[arg(long, env = "GITHUB_BASE_REF")]
    pub base_ref: Option<String>,

    /// Base revision (commit SHA) of the pull request
    #[arg(long, env = "INPUT_BASE-SHA")]
    pub base_sha: Option<String>,

    /// Head revision (commit SHA) of the pull request
    #[arg(long, env = "INPUT_HEAD-SHA")]
    pub head_sha: Option<String>,

    /// Remote to fetch the base branch from
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Skip fetching history (the base revision must already be present)
    #[arg(long)]
    pub no_fetch: bool,

    /// Lockfile path relative to the working tree
    #[arg(long, default_value = PIPFILE_LOCK)]
    pub lockfile: PathBuf,

    // Hosting service
    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// API token used to list, create and edit comments
    #[arg(long, env = "INPUT_REPO-TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path of the CI event payload (JSON with the pull request `number`)
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Pull request number (overrides the event payload)
    #[arg(long)]
    pub pr_number: Option<u64>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// HTTP timeout (e.g., 30, 30s, 2m)
    #[arg(long, value_parser = parse_timeout, default_value = "30s")]
    pub timeout: Duration,

    /// Retries for transport errors and rate limiting
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    // General options
    /// Dry run mode - compute and print the diff without touching the pull request
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// How the diff is printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["lockdiff"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.remote, "origin");
        assert_eq!(args.lockfile, PathBuf::from("Pipfile.lock"));
        assert_eq!(args.timeout, Duration::from_secs(30));
        assert_eq!(args.max_retries, 0);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.pr_number.is_none());
        assert!(!args.no_fetch);
        assert!(!args.dry_run);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["lockdiff", "/some/path"]);
        assert_eq!(args.path, PathBuf::from("/some/path"));
    }

    #[test]
    fn test_revision_flags() {
        let args = CliArgs::parse_from([
            "lockdiff",
            "--base-ref",
            "main",
            "--base-sha",
            "aaa",
            "--head-sha",
            "bbb",
        ]);
        assert_eq!(args.base_ref.as_deref(), Some("main"));
        assert_eq!(args.base_sha.as_deref(), Some("aaa"));
        assert_eq!(args.head_sha.as_deref(), Some("bbb"));
    }

    #[test]
    fn test_hosting_flags() {
        let args = CliArgs::parse_from([
            "lockdiff",
            "--repository",
            "octo/app",
            "--token",
            "secret",
            "--pr-number",
            "12",
            "--api-url",
            "https://ghe.example.com/api/v3",
        ]);
        assert_eq!(args.repository.as_deref(), Some("octo/app"));
        assert_eq!(args.token.as_deref(), Some("secret"));
        assert_eq!(args.pr_number, Some(12));
        assert_eq!(args.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_dry_run_short_flag() {
        let args = CliArgs::parse_from(["lockdiff", "-n"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_format_flag() {
        let args = CliArgs::parse_from(["lockdiff", "--format", "markdown"]);
        assert_eq!(args.format, OutputFormat::Markdown);

        let args = CliArgs::parse_from(["lockdiff", "--format", "json"]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["lockdiff", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("45"), Ok(Duration::from_secs(45)));
        assert_eq!(parse_timeout("10s"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_timeout("2m"), Ok(Duration::from_secs(120)));
    }

    #[test]
    fn test_parse_timeout_invalid() {
        assert!(parse_timeout("").is_err());
        assert!(parse_timeout("abc").is_err());
        assert!(parse_timeout("0").is_err());
    }
}
