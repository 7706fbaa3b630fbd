//! Entity and value types for the reviewer-assignment domain.
//!
//! [`User`] and [`Team`] are plain records. [`PullRequest`] keeps its fields
//! private so its status transitions stay consistent: a pull request is only
//! ever `Merged` together with a merge timestamp, and its reviewer list only
//! changes by in-place substitution.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{PullRequestId, TeamName, UserId};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

// ---------------------------------------------------------------------------
// Users and teams
// ---------------------------------------------------------------------------

/// A team member who may author pull requests and review teammates' ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// The single team the user currently belongs to.
    pub team_name: TeamName,
    /// Inactive users are never picked as reviewers.
    pub is_active: bool,
}

/// A member entry as supplied when a team is added. Becomes a [`User`] of
/// that team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: UserId,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    pub fn into_user(self, team_name: TeamName) -> User {
        User {
            id: self.id,
            username: self.username,
            team_name,
            is_active: self.is_active,
        }
    }
}

/// A named team and the identifiers of the users registered with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: TeamName,
    pub members: Vec<UserId>,
}

// ---------------------------------------------------------------------------
// Pull requests
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`PullRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    Open,
    Merged,
}

impl PullRequestStatus {
    /// Wire representation (`"OPEN"` / `"MERGED"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl std::fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    id: PullRequestId,
    name: String,
    author_id: UserId,
    status: PullRequestStatus,
    assigned_reviewers: Vec<UserId>,
    created_at: Timestamp,
    merged_at: Option<Timestamp>,
}

impl PullRequest {
    /// Creates a pull request in the `Open` state.
    pub fn open(
        id: PullRequestId,
        name: impl Into<String>,
        author_id: UserId,
        assigned_reviewers: Vec<UserId>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers,
            created_at,
            merged_at: None,
        }
    }

    pub fn id(&self) -> PullRequestId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Reviewers in assignment order. Reassignment keeps positions stable.
    pub fn assigned_reviewers(&self) -> &[UserId] {
        &self.assigned_reviewers
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// `Some` exactly when the status is `Merged`.
    pub fn merged_at(&self) -> Option<Timestamp> {
        self.merged_at
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: UserId) -> bool {
        self.assigned_reviewers.contains(&user_id)
    }

    /// Marks the pull request merged at `at`.
    ///
    /// Returns `false` and leaves the record untouched if it was already
    /// merged, so the first merge timestamp is kept.
    pub fn merge(&mut self, at: Timestamp) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(at);
        true
    }

    /// Substitutes `new` for `old` at `old`'s position in the reviewer list.
    ///
    /// Returns `false` if `old` is not assigned.
    pub fn replace_reviewer(&mut self, old: UserId, new: UserId) -> bool {
        match self.assigned_reviewers.iter_mut().find(|id| **id == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }
}
