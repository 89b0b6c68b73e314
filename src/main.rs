//! lockdiff - Pipfile.lock pull request diff CLI tool
//!
//! Checks out the base and head revisions of a pull request, compares
//! their Pipfile.lock dependencies and keeps a single summary comment on
//! the pull request up to date.

use clap::Parser;
use lockdiff::cli::CliArgs;
use lockdiff::config::RunConfig;
use lockdiff::github::{CommentApi, GitHubAdapter, HttpClient};
use lockdiff::logging;
use lockdiff::orchestrator::{Orchestrator, RunOutcome};
use lockdiff::output::{create_formatter, OutputConfig, Verbosity};
use lockdiff::vcs::GitWorkspace;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    // Run the main logic and handle errors
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = RunConfig::from_cli(&args)?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        root = %config.root.display(),
        base = %config.base_sha,
        head = %config.head_sha,
        dry_run = config.dry_run,
        "starting lockdiff"
    );

    let workspace = GitWorkspace::new(&config.root);
    let adapter = match &config.target {
        Some(target) => {
            let client = HttpClient::with_timeout(&target.token, target.timeout)?
                .with_max_retries(target.max_retries);
            Some(GitHubAdapter::new(
                client,
                &target.api_url,
                target.repository.clone(),
            ))
        }
        None => None,
    };

    let show_progress = !args.quiet && io::stderr().is_terminal();
    let orchestrator = Orchestrator::new(
        config,
        &workspace,
        adapter.as_ref().map(|a| a as &dyn CommentApi),
    )
    .with_progress(show_progress);
    let outcome = orchestrator.run().await?;

    let output_config = OutputConfig::from_cli(args.format, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    match &outcome {
        RunOutcome::Unchanged => {
            if !args.quiet {
                writeln!(stdout, "No dependency changes.")?;
            }
        }
        RunOutcome::DryRun { diff, .. } | RunOutcome::Posted { diff, .. } => {
            formatter.format(diff, &mut stdout)?
        }
    }
    stdout.flush()?;

    Ok(())
}
