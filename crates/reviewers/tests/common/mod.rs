//! Shared fixtures for the service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use reviewers::{
    PullRequestId, PullRequestService, TeamMember, TeamName, TeamService, UserId, UserService,
};
use storage::InMemoryRepository;

pub const SEED: u64 = 7;

/// All three services wired to one shared in-memory repository.
pub struct Fixture {
    pub repo: Arc<InMemoryRepository>,
    pub teams: TeamService,
    pub users: UserService,
    pub prs: PullRequestService,
}

impl Fixture {
    pub fn new() -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        Self {
            teams: TeamService::new(repo.clone(), repo.clone()),
            users: UserService::new(repo.clone()),
            prs: PullRequestService::with_seed(repo.clone(), repo.clone(), SEED),
            repo,
        }
    }

    /// Adds a team whose members are all active and returns their ids in
    /// roster order.
    pub async fn team_of(&self, name: &str, size: usize) -> Vec<UserId> {
        let members: Vec<TeamMember> = (0..size)
            .map(|i| member(&format!("{name}-{i}"), true))
            .collect();
        let ids = members.iter().map(|m| m.id).collect();
        self.teams
            .add_team(team_name(name), members)
            .await
            .expect("team should be created");
        ids
    }
}

pub fn team_name(name: &str) -> TeamName {
    TeamName::new(name).expect("team name must be non-empty")
}

pub fn member(username: &str, is_active: bool) -> TeamMember {
    TeamMember {
        id: UserId::new_random(),
        username: username.to_string(),
        is_active,
    }
}

pub fn pr_id() -> PullRequestId {
    PullRequestId::new_random()
}
