//! Error types for the reviewer-assignment domain.
//!
//! [`RepositoryError`] is what storage adapters report through the
//! [`crate::repository`] ports. [`ReviewError`] is what the services return;
//! it adds the business-rule failures (merged pull request, reviewer not
//! assigned, no replacement candidate, malformed input).
//!
//! None of these are fatal to the process. The HTTP adapter maps each variant
//! to a status code and a machine-readable error code.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// Which collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Team,
    PullRequest,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Team => "team",
            Self::PullRequest => "pull request",
        })
    }
}

// ---------------------------------------------------------------------------
// Repository errors
// ---------------------------------------------------------------------------

/// Errors reported by a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// `get` or `update` referenced a key that is not stored.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: EntityKind, id: String },

    /// `create` referenced a key that is already stored.
    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: EntityKind, id: String },

    /// The backend failed for a reason unrelated to the request.
    #[error("storage failure during {operation}: {message}")]
    Storage { operation: String, message: String },
}

impl RepositoryError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: EntityKind, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }

    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Service errors
// ---------------------------------------------------------------------------

/// Errors returned by the team, user and pull-request services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// A referenced entity does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: EntityKind, id: String },

    /// An entity with the same key already exists.
    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: EntityKind, id: String },

    /// A mutation was attempted on a merged pull request.
    #[error("pull request '{id}' is already merged")]
    PullRequestMerged { id: String },

    /// The reviewer to be replaced is not assigned to the pull request.
    #[error("user '{reviewer}' is not assigned to pull request '{pull_request}'")]
    NotAssigned {
        pull_request: String,
        reviewer: String,
    },

    /// Every active teammate is either the author or already a reviewer.
    #[error("no active replacement candidate in team '{team}'")]
    NoCandidate { team: String },

    /// The request was malformed.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The repository failed unexpectedly. Surfaced as an internal error.
    #[error("storage failure during {operation}: {message}")]
    Storage { operation: String, message: String },
}

impl ReviewError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for ReviewError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepositoryError::AlreadyExists { entity, id } => Self::AlreadyExists { entity, id },
            RepositoryError::Storage { operation, message } => {
                Self::Storage { operation, message }
            }
        }
    }
}
