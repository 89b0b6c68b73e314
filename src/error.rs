//! Application error types using thiserror
//!
//! Error hierarchy:
//! - LockfileError: Issues with reading or parsing Pipfile.lock
//! - VcsError: Failed git fetch/checkout invocations
//! - ApiError: Issues with the hosting service comment API
//! - ConfigError: Issues with CLI/environment configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Lockfile related errors
    #[error(transparent)]
    Lockfile(#[from] LockfileError),

    /// Version control related errors
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// Hosting API related errors
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to lockfile operations
#[derive(Error, Debug)]
pub enum LockfileError {
    /// Lockfile not found in the working tree
    #[error("lockfile not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read lockfile
    #[error("failed to read lockfile {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lockfile content is not valid JSON
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// A dependency group is absent or is not an object
    #[error("lockfile {path} has no '{group}' group")]
    MissingGroup { path: PathBuf, group: String },

    /// Entry carries neither a version nor a VCS ref
    #[error("dependency '{name}' in {path} has neither 'version' nor 'ref'")]
    MissingVersion { path: PathBuf, name: String },
}

/// Errors related to git invocations
#[derive(Error, Debug)]
pub enum VcsError {
    /// Command ran and exited with a non-zero status
    #[error("`{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Command could not be started at all
    #[error("failed to run `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the hosting service API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Credential rejected (401/403)
    #[error("authentication failed for {endpoint}: {message}")]
    Authentication { endpoint: String, message: String },

    /// Repository, pull request or comment does not exist
    #[error("not found: {endpoint}")]
    NotFound { endpoint: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {endpoint}")]
    RateLimitExceeded { endpoint: String },

    /// Transport failure or unexpected HTTP status
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    /// Response body did not match the expected shape
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// Timeout
    #[error("timeout while calling {endpoint}")]
    Timeout { endpoint: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required setting was not supplied by flag or environment
    #[error("missing required setting '{name}' (flag {flag} or env {env})")]
    MissingValue {
        name: String,
        flag: String,
        env: String,
    },

    /// Repository identifier is not `owner/name`
    #[error("invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },

    /// CI event payload could not be read or parsed
    #[error("invalid event payload {path}: {message}")]
    EventPayload { path: PathBuf, message: String },
}

impl LockfileError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        LockfileError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LockfileError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LockfileError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingGroup error
    pub fn missing_group(path: impl Into<PathBuf>, group: impl Into<String>) -> Self {
        LockfileError::MissingGroup {
            path: path.into(),
            group: group.into(),
        }
    }

    /// Creates a new MissingVersion error
    pub fn missing_version(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        LockfileError::MissingVersion {
            path: path.into(),
            name: name.into(),
        }
    }
}

impl VcsError {
    /// Creates a new CommandFailed error
    pub fn command_failed(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        VcsError::CommandFailed {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new SpawnFailed error
    pub fn spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        VcsError::SpawnFailed {
            command: command.into(),
            source,
        }
    }
}

impl ApiError {
    /// Creates a new Authentication error
    pub fn authentication(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Authentication {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a new NotFound error
    pub fn not_found(endpoint: impl Into<String>) -> Self {
        ApiError::NotFound {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a new Network error
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(endpoint: impl Into<String>) -> Self {
        ApiError::Timeout {
            endpoint: endpoint.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new MissingValue error
    pub fn missing(
        name: impl Into<String>,
        flag: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        ConfigError::MissingValue {
            name: name.into(),
            flag: flag.into(),
            env: env.into(),
        }
    }

    /// Creates a new EventPayload error
    pub fn event_payload(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::EventPayload {
            path: path.into(),
            message: message.into(),
        }
    }
}
