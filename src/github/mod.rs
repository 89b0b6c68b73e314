//! Pull request comment API
//!
//! This module provides:
//! - A narrow `CommentApi` trait (list / create / edit issue comments)
//! - The GitHub REST implementation over a shared HTTP client
//! - Idempotent find-or-create upsert of the managed comment

mod client;
mod rest;
#[cfg(test)]
mod stub_server;

pub use client::{check_status, HttpClient, DEFAULT_TIMEOUT};
pub use rest::{GitHubAdapter, DEFAULT_API_URL};

use crate::error::ApiError;
use crate::output::is_managed_comment;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A comment on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Comment identifier, stable across edits
    pub id: u64,
    /// Markdown body; the API may omit it
    #[serde(default)]
    pub body: Option<String>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Last edit time
    pub updated_at: Option<DateTime<Utc>>,
}

impl IssueComment {
    /// Returns the body or an empty string
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Trait for pull request comment backends
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// List all comments on a pull request, oldest first
    async fn list_comments(&self, pr_number: u64) -> Result<Vec<IssueComment>, ApiError>;

    /// Create a new comment on a pull request
    async fn create_comment(&self, pr_number: u64, body: &str) -> Result<IssueComment, ApiError>;

    /// Replace the body of an existing comment
    async fn edit_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment, ApiError>;
}

/// What the upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No managed comment existed; a new one was created
    Created(u64),
    /// The existing managed comment was edited in place
    Updated(u64),
}

impl UpsertOutcome {
    /// Returns the affected comment identifier
    pub fn comment_id(&self) -> u64 {
        match self {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created(id) => write!(f, "created comment {}", id),
            UpsertOutcome::Updated(id) => write!(f, "updated comment {}", id),
        }
    }
}

/// Find the first managed comment among `comments`
pub fn find_managed_comment(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments.iter().find(|c| is_managed_comment(c.body()))
}

/// Edit the managed comment on `pr_number` if present, otherwise create it
pub async fn upsert_comment(
    api: &dyn CommentApi,
    pr_number: u64,
    message: &str,
) -> Result<UpsertOutcome, ApiError> {
    let comments = api.list_comments(pr_number).await?;
    tracing::debug!(pr_number, count = comments.len(), "listed comments");

    match find_managed_comment(&comments) {
        Some(existing) => {
            let edited = api.edit_comment(existing.id, message).await?;
            Ok(UpsertOutcome::Updated(edited.id))
        }
        None => {
            let created = api.create_comment(pr_number, message).await?;
            Ok(UpsertOutcome::Created(created.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::COMMENT_MARKER;
    use std::sync::Mutex;

    /// In-memory comment store
    #[derive(Default)]
    struct FakeApi {
        comments: Mutex<Vec<IssueComment>>,
        next_id: Mutex<u64>,
    }

    impl FakeApi {
        fn with_comments(bodies: &[&str]) -> Self {
            let api = FakeApi::default();
            for body in bodies {
                api.push(body);
            }
            api
        }

        fn push(&self, body: &str) -> IssueComment {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let comment = IssueComment {
                id: *next_id,
                body: Some(body.to_string()),
                created_at: None,
                updated_at: None,
            };
            self.comments.lock().unwrap().push(comment.clone());
            comment
        }
    }

    #[async_trait]
    impl CommentApi for FakeApi {
        async fn list_comments(&self, _pr: u64) -> Result<Vec<IssueComment>, ApiError> {
            Ok(self.comments.lock().unwrap().clone())
        }

        async fn create_comment(&self, _pr: u64, body: &str) -> Result<IssueComment, ApiError> {
            Ok(self.push(body))
        }

        async fn edit_comment(&self, id: u64, body: &str) -> Result<IssueComment, ApiError> {
            let mut comments = self.comments.lock().unwrap();
            let comment = comments
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| ApiError::not_found(format!("comment {}", id)))?;
            comment.body = Some(body.to_string());
            Ok(comment.clone())
        }
    }

    fn message(text: &str) -> String {
        format!("{}\n\n{}", COMMENT_MARKER, text)
    }

    #[tokio::test]
    async fn test_upsert_creates_when_missing() {
        let api = FakeApi::with_comments(&["LGTM"]);
        let outcome = upsert_comment(&api, 1, &message("first")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Created(2));
        assert_eq!(api.comments.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_edits_existing() {
        let api = FakeApi::with_comments(&["LGTM", message("old").as_str()]);
        let outcome = upsert_comment(&api, 1, &message("new")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated(2));

        let comments = api.comments.lock().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].body(), message("new"));
    }

    #[tokio::test]
    async fn test_second_run_keeps_comment_identity() {
        let api = FakeApi::default();
        let first = upsert_comment(&api, 7, &message("a")).await.unwrap();
        let second = upsert_comment(&api, 7, &message("b")).await.unwrap();
        assert!(matches!(first, UpsertOutcome::Created(_)));
        assert_eq!(second, UpsertOutcome::Updated(first.comment_id()));
        assert_eq!(api.comments.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_find_managed_comment_first_match() {
        let comments = vec![
            IssueComment {
                id: 10,
                body: Some("mentions <!-- pipfile-diff --> inline".to_string()),
                created_at: None,
                updated_at: None,
            },
            IssueComment {
                id: 11,
                body: Some(message("one")),
                created_at: None,
                updated_at: None,
            },
            IssueComment {
                id: 12,
                body: Some(message("two")),
                created_at: None,
                updated_at: None,
            },
            IssueComment {
                id: 13,
                body: None,
                created_at: None,
                updated_at: None,
            },
        ];
        assert_eq!(find_managed_comment(&comments).map(|c| c.id), Some(11));
    }

    #[test]
    fn test_issue_comment_deserialize() {
        let json = r#"{
            "id": 1,
            "body": "hello",
            "user": {"login": "octocat"},
            "created_at": "2024-01-02T03:04:05Z",
            "updated_at": "2024-01-02T03:04:05Z"
        }"#;
        let comment: IssueComment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, 1);
        assert_eq!(comment.body(), "hello");
        assert!(comment.created_at.is_some());
    }

    #[test]
    fn test_upsert_outcome_display() {
        assert_eq!(UpsertOutcome::Created(5).to_string(), "created comment 5");
        assert_eq!(UpsertOutcome::Updated(5).comment_id(), 5);
    }
}
