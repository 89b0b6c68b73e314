//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Bearer token authentication and GitHub media type headers
//! - Optional exponential backoff retry for transport errors and rate limits
//! - Status code to ApiError mapping

use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("lockdiff/", env!("CARGO_PKG_VERSION"));

/// GitHub REST media type
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Header GitHub uses to report the remaining primary rate limit
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// HTTP client wrapper with authentication and retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client authenticated with `token`
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_config(token, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(token: &str, timeout: Duration) -> Result<Self, ApiError> {
        Self::with_config(token, timeout, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        token: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        Self::build(Self::builder(token, timeout, user_agent)?)
    }

    /// Client that ignores proxy environment variables, for local servers
    #[cfg(test)]
    pub(crate) fn without_proxy(token: &str) -> Result<Self, ApiError> {
        Self::build(Self::builder(token, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)?.no_proxy())
    }

    fn builder(
        token: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<ClientBuilder, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ApiError::authentication("HTTP client", "token contains invalid header characters")
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers))
    }

    fn build(builder: ClientBuilder) -> Result<Self, ApiError> {
        let client = builder.build().map_err(|e| {
            ApiError::network("HTTP client", format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            max_retries: 0,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, url, None::<&()>).await?;
        parse_json(response, url).await
    }

    /// Perform a POST request with a JSON body and parse the JSON response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, url, Some(body)).await?;
        parse_json(response, url).await
    }

    /// Perform a PATCH request with a JSON body and parse the JSON response
    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PATCH, url, Some(body)).await?;
        parse_json(response, url).await
    }

    /// Send a request, retrying transport errors and 429 up to `max_retries` times
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            let mut request = self.client.request(method.clone(), url);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => match check_status(response.status(), response.headers(), url) {
                    Ok(()) => return Ok(response),
                    Err(err @ ApiError::RateLimitExceeded { .. }) => {
                        tracing::warn!(url, attempt, "rate limited");
                        last_error = Some(err);
                    }
                    Err(err) => {
                        let message = response.text().await.unwrap_or_default();
                        tracing::debug!(url, body = %message, "request rejected");
                        return Err(match err {
                            ApiError::Authentication { endpoint, .. } => {
                                ApiError::authentication(endpoint, api_message(&message))
                            }
                            other => other,
                        });
                    }
                },
                Err(e) => {
                    tracing::warn!(url, attempt, error = %e, "request failed");
                    last_error = Some(if e.is_timeout() {
                        ApiError::timeout(url)
                    } else {
                        ApiError::network(url, e.to_string())
                    });
                }
            }

            if attempt < self.max_retries {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::network(url, "unknown error")))
    }
}

/// Map an HTTP status to success or the matching ApiError
///
/// A 403 with an exhausted primary rate limit is reported as
/// `RateLimitExceeded`, not as an authentication failure.
pub fn check_status(
    status: StatusCode,
    headers: &HeaderMap,
    endpoint: &str,
) -> Result<(), ApiError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::FORBIDDEN if rate_limit_exhausted(headers) => {
            Err(ApiError::RateLimitExceeded {
                endpoint: endpoint.to_string(),
            })
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::authentication(
            endpoint,
            format!("HTTP {}", status),
        )),
        StatusCode::NOT_FOUND => Err(ApiError::not_found(endpoint)),
        StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimitExceeded {
            endpoint: endpoint.to_string(),
        }),
        _ => Err(ApiError::network(endpoint, format!("HTTP {}", status))),
    }
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Extract the `message` field GitHub puts in error bodies
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::invalid_response(url, format!("failed to parse JSON: {}", e)))
}
