//! GitHub REST adapter for issue comments
//!
//! Endpoints:
//! - GET   {api}/repos/{owner}/{repo}/issues/{number}/comments
//! - POST  {api}/repos/{owner}/{repo}/issues/{number}/comments
//! - PATCH {api}/repos/{owner}/{repo}/issues/comments/{id}

use crate::domain::Repository;
use crate::error::ApiError;
use crate::github::{CommentApi, HttpClient, IssueComment};
use async_trait::async_trait;
use serde::Serialize;

/// GitHub API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size used when listing comments (the API maximum)
const PER_PAGE: usize = 100;

/// GitHub comment adapter
pub struct GitHubAdapter {
    client: HttpClient,
    api_url: String,
    repository: Repository,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GitHubAdapter {
    /// Create a new adapter for `repository`
    pub fn new(client: HttpClient, api_url: &str, repository: Repository) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repository,
        }
    }

    /// Build the issue comments collection URL for a pull request
    fn comments_url(&self, pr_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, self.repository.owner, self.repository.name, pr_number
        )
    }

    /// Build the URL of a single comment
    fn comment_url(&self, comment_id: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/comments/{}",
            self.api_url, self.repository.owner, self.repository.name, comment_id
        )
    }
}

#[async_trait]
impl CommentApi for GitHubAdapter {
    async fn list_comments(&self, pr_number: u64) -> Result<Vec<IssueComment>, ApiError> {
        let base = self.comments_url(pr_number);
        let mut comments = Vec::new();
        let mut page = 1;

        loop {
            let url = format!("{}?per_page={}&page={}", base, PER_PAGE, page);
            let batch: Vec<IssueComment> = self.client.get_json(&url).await?;
            let len = batch.len();
            comments.extend(batch);

            if len < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(comments)
    }

    async fn create_comment(&self, pr_number: u64, body: &str) -> Result<IssueComment, ApiError> {
        let url = self.comments_url(pr_number);
        self.client.post_json(&url, &CommentBody { body }).await
    }

    async fn edit_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment, ApiError> {
        let url = self.comment_url(comment_id);
        self.client.patch_json(&url, &CommentBody { body }).await
    }
}
