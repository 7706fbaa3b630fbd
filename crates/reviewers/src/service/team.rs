//! Team creation and lookup.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    EntityKind, ReviewError, Team, TeamMember, TeamName, TeamRepository, User, UserRepository,
};

/// Creates teams and resolves their rosters.
pub struct TeamService {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(users: Arc<dyn UserRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { users, teams }
    }

    /// Creates a team and upserts each of its members as a user of that team.
    ///
    /// Members are written before the team record. If a later write fails the
    /// team is not created, but members already written stay written: the
    /// repository offers no multi-entity rollback.
    #[instrument(skip_all, fields(team_name = %name, members_count = members.len()))]
    pub async fn add_team(
        &self,
        name: TeamName,
        members: Vec<TeamMember>,
    ) -> Result<Team, ReviewError> {
        if self.teams.team_exists(&name).await? {
            warn!("team already exists");
            return Err(ReviewError::AlreadyExists {
                entity: EntityKind::Team,
                id: name.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(members.len());
        if let Some(dup) = members.iter().find(|m| !seen.insert(m.id)) {
            return Err(ReviewError::invalid_input(format!(
                "user '{}' is listed more than once",
                dup.id
            )));
        }

        let member_ids = members.iter().map(|m| m.id).collect();
        for member in members {
            self.upsert_member(member.into_user(name.clone())).await?;
        }

        let team = Team {
            name,
            members: member_ids,
        };
        self.teams
            .create_team(team.clone())
            .await
            .inspect_err(|e| warn!(error = %e, "failed to create team after member upserts"))?;

        info!("team created");
        Ok(team)
    }

    /// Returns the team and the users its member list resolves to. Member ids
    /// with no stored user are left out.
    #[instrument(skip_all, fields(team_name = %name))]
    pub async fn get_team(&self, name: &TeamName) -> Result<(Team, Vec<User>), ReviewError> {
        let team = self.teams.get_team(name).await?;
        let users = self.users.users_by_ids(&team.members).await?;
        debug!(members_count = users.len(), "team retrieved");
        Ok((team, users))
    }

    async fn upsert_member(&self, user: User) -> Result<(), ReviewError> {
        let result = if self.users.user_exists(user.id).await? {
            self.users.update_user(user.clone()).await
        } else {
            self.users.create_user(user.clone()).await
        };
        result.inspect_err(|e| warn!(user_id = %user.id, error = %e, "failed to upsert member"))?;
        Ok(())
    }
}
