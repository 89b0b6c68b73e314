//! Core domain models for lockdiff
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency groups of a Pipfile.lock
//! - The flat dependency name → version descriptor map
//! - Diff results between two revisions
//! - Repository identifiers

mod dependency_map;
mod diff_result;
mod group;
mod repository;

pub use dependency_map::DependencyMap;
pub use diff_result::{DiffResult, VersionChange};
pub use group::DependencyGroup;
pub use repository::Repository;
