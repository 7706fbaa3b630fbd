//! In-memory implementation of the repository ports.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use reviewers::{
    EntityKind, PullRequest, PullRequestId, PullRequestRepository, RepositoryError, Team,
    TeamName, TeamRepository, User, UserId, UserRepository,
};

/// In-memory repository for users, teams and pull requests.
///
/// Each collection sits behind its own `RwLock`: reads run concurrently,
/// writes to one collection are serialized. Every read hands out a clone.
pub struct InMemoryRepository {
    users: RwLock<HashMap<UserId, User>>,
    teams: RwLock<HashMap<TeamName, Team>>,
    pull_requests: RwLock<HashMap<PullRequestId, PullRequest>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            teams: RwLock::new(HashMap::new()),
            pull_requests: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Users
// =========================================================================

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        match users.entry(user.id) {
            Entry::Occupied(_) => {
                warn!(user_id = %user.id, "user already exists");
                Err(RepositoryError::already_exists(EntityKind::User, user.id))
            }
            Entry::Vacant(slot) => {
                info!(
                    user_id = %user.id,
                    username = %user.username,
                    team_name = %user.team_name,
                    is_active = user.is_active,
                    "creating user"
                );
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn update_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) => {
                info!(
                    user_id = %user.id,
                    username = %user.username,
                    team_name = %user.team_name,
                    is_active = user.is_active,
                    "updating user"
                );
                *stored = user;
                Ok(())
            }
            None => {
                warn!(user_id = %user.id, "user not found for update");
                Err(RepositoryError::not_found(EntityKind::User, user.id))
            }
        }
    }

    async fn get_user(&self, id: UserId) -> Result<User, RepositoryError> {
        let users = self.users.read().await;
        match users.get(&id) {
            Some(user) => {
                debug!(user_id = %id, "user retrieved");
                Ok(user.clone())
            }
            None => {
                warn!(user_id = %id, "user not found");
                Err(RepositoryError::not_found(EntityKind::User, id))
            }
        }
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.users.read().await.contains_key(&id))
    }

    async fn users_by_team(&self, team: &TeamName) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;
        let members: Vec<User> = users
            .values()
            .filter(|u| &u.team_name == team)
            .cloned()
            .collect();
        debug!(team_name = %team, count = members.len(), "users retrieved by team");
        Ok(members)
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;
        let found: Vec<User> = ids.iter().filter_map(|id| users.get(id).cloned()).collect();
        debug!(requested = ids.len(), found = found.len(), "users retrieved by ids");
        Ok(found)
    }
}

// =========================================================================
// Teams
// =========================================================================

#[async_trait]
impl TeamRepository for InMemoryRepository {
    async fn create_team(&self, team: Team) -> Result<(), RepositoryError> {
        let mut teams = self.teams.write().await;
        match teams.entry(team.name.clone()) {
            Entry::Occupied(_) => {
                warn!(team_name = %team.name, "team already exists");
                Err(RepositoryError::already_exists(EntityKind::Team, &team.name))
            }
            Entry::Vacant(slot) => {
                info!(
                    team_name = %team.name,
                    members_count = team.members.len(),
                    "creating team"
                );
                slot.insert(team);
                Ok(())
            }
        }
    }

    async fn get_team(&self, name: &TeamName) -> Result<Team, RepositoryError> {
        let teams = self.teams.read().await;
        match teams.get(name) {
            Some(team) => {
                debug!(team_name = %name, "team retrieved");
                Ok(team.clone())
            }
            None => {
                warn!(team_name = %name, "team not found");
                Err(RepositoryError::not_found(EntityKind::Team, name))
            }
        }
    }

    async fn team_exists(&self, name: &TeamName) -> Result<bool, RepositoryError> {
        Ok(self.teams.read().await.contains_key(name))
    }
}

// =========================================================================
// Pull requests
// =========================================================================

#[async_trait]
impl PullRequestRepository for InMemoryRepository {
    async fn create_pull_request(&self, pr: PullRequest) -> Result<(), RepositoryError> {
        let mut prs = self.pull_requests.write().await;
        match prs.entry(pr.id()) {
            Entry::Occupied(_) => {
                warn!(pr_id = %pr.id(), "pull request already exists");
                Err(RepositoryError::already_exists(EntityKind::PullRequest, pr.id()))
            }
            Entry::Vacant(slot) => {
                info!(
                    pr_id = %pr.id(),
                    pr_name = %pr.name(),
                    author_id = %pr.author_id(),
                    reviewers_count = pr.assigned_reviewers().len(),
                    "creating pull request"
                );
                slot.insert(pr);
                Ok(())
            }
        }
    }

    async fn update_pull_request(&self, pr: PullRequest) -> Result<(), RepositoryError> {
        let mut prs = self.pull_requests.write().await;
        match prs.get_mut(&pr.id()) {
            Some(stored) => {
                info!(pr_id = %pr.id(), status = %pr.status(), "updating pull request");
                *stored = pr;
                Ok(())
            }
            None => {
                warn!(pr_id = %pr.id(), "pull request not found for update");
                Err(RepositoryError::not_found(EntityKind::PullRequest, pr.id()))
            }
        }
    }

    async fn get_pull_request(&self, id: PullRequestId) -> Result<PullRequest, RepositoryError> {
        let prs = self.pull_requests.read().await;
        match prs.get(&id) {
            Some(pr) => {
                debug!(pr_id = %id, "pull request retrieved");
                Ok(pr.clone())
            }
            None => {
                warn!(pr_id = %id, "pull request not found");
                Err(RepositoryError::not_found(EntityKind::PullRequest, id))
            }
        }
    }

    async fn pull_request_exists(&self, id: PullRequestId) -> Result<bool, RepositoryError> {
        Ok(self.pull_requests.read().await.contains_key(&id))
    }

    async fn pull_requests_by_reviewer(
        &self,
        reviewer: UserId,
    ) -> Result<Vec<PullRequest>, RepositoryError> {
        let prs = self.pull_requests.read().await;
        let matching: Vec<PullRequest> = prs
            .values()
            .filter(|pr| pr.has_reviewer(reviewer))
            .cloned()
            .collect();
        debug!(user_id = %reviewer, count = matching.len(), "pull requests retrieved by reviewer");
        Ok(matching)
    }
}
