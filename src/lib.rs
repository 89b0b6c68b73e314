//! lockdiff - Pipfile.lock pull request diff library
//!
//! This library provides the core functionality for:
//! - Parsing Pipfile.lock into a dependency → version map
//! - Diffing base and head revisions (added / removed / changed)
//! - Rendering the diff as a marked pull request comment
//! - Creating or updating that comment through the GitHub API

pub mod cli;
pub mod config;
pub mod diff;
pub mod domain;
pub mod error;
pub mod github;
pub mod lockfile;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod vcs;
