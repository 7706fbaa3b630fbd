//! Repository ports.
//!
//! The services read and write users, teams and pull requests only through
//! these traits. Implementations must make every single-entity operation
//! atomic and must hand out owned copies: mutating a returned value never
//! changes what is stored until it is written back with `update`.
//!
//! No multi-entity transactions are offered. Composite operations such as
//! adding a team perform several independent writes, and a concurrent reader
//! may observe the intermediate state.

use async_trait::async_trait;

use crate::{PullRequest, PullRequestId, RepositoryError, Team, TeamName, User, UserId};

/// Storage for [`User`] records, keyed by [`UserId`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with `AlreadyExists` if the id is taken.
    async fn create_user(&self, user: User) -> Result<(), RepositoryError>;

    /// Replaces a stored user. Fails with `NotFound` if the id is unknown.
    async fn update_user(&self, user: User) -> Result<(), RepositoryError>;

    /// Fails with `NotFound` if the id is unknown.
    async fn get_user(&self, id: UserId) -> Result<User, RepositoryError>;

    async fn user_exists(&self, id: UserId) -> Result<bool, RepositoryError>;

    /// All users whose current team is `team`, in no particular order.
    async fn users_by_team(&self, team: &TeamName) -> Result<Vec<User>, RepositoryError>;

    /// The users among `ids` that exist, in the order requested. Unknown ids
    /// are skipped.
    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;
}

/// Storage for [`Team`] records, keyed by [`TeamName`].
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Inserts a new team. Fails with `AlreadyExists` if the name is taken.
    async fn create_team(&self, team: Team) -> Result<(), RepositoryError>;

    /// Fails with `NotFound` if the name is unknown.
    async fn get_team(&self, name: &TeamName) -> Result<Team, RepositoryError>;

    async fn team_exists(&self, name: &TeamName) -> Result<bool, RepositoryError>;
}

/// Storage for [`PullRequest`] records, keyed by [`PullRequestId`].
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Inserts a new pull request. Fails with `AlreadyExists` if the id is taken.
    async fn create_pull_request(&self, pr: PullRequest) -> Result<(), RepositoryError>;

    /// Replaces a stored pull request. Fails with `NotFound` if the id is unknown.
    async fn update_pull_request(&self, pr: PullRequest) -> Result<(), RepositoryError>;

    /// Fails with `NotFound` if the id is unknown.
    async fn get_pull_request(&self, id: PullRequestId) -> Result<PullRequest, RepositoryError>;

    async fn pull_request_exists(&self, id: PullRequestId) -> Result<bool, RepositoryError>;

    /// Every pull request that lists `reviewer` among its assigned reviewers,
    /// each exactly once, in storage iteration order.
    async fn pull_requests_by_reviewer(
        &self,
        reviewer: UserId,
    ) -> Result<Vec<PullRequest>, RepositoryError>;
}
