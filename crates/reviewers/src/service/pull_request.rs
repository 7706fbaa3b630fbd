//! Pull-request lifecycle and reviewer assignment.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use super::selection::{self, MAX_REVIEWERS};
use crate::{
    EntityKind, PullRequest, PullRequestId, PullRequestRepository, ReviewError, Timestamp,
    UserId, UserRepository,
};

/// Creates, merges and reassigns pull requests.
///
/// Reviewers are drawn from the author's team (on creation) or from the
/// replaced reviewer's team (on reassignment) using an owned, seedable
/// generator.
pub struct PullRequestService {
    users: Arc<dyn UserRepository>,
    pull_requests: Arc<dyn PullRequestRepository>,
    rng: Mutex<StdRng>,
}

impl PullRequestService {
    /// Creates a service whose generator is seeded from OS entropy.
    pub fn new(
        users: Arc<dyn UserRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
    ) -> Self {
        Self::with_rng(users, pull_requests, StdRng::from_entropy())
    }

    /// Creates a service with a fixed seed, for reproducible assignments.
    pub fn with_seed(
        users: Arc<dyn UserRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
        seed: u64,
    ) -> Self {
        Self::with_rng(users, pull_requests, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        users: Arc<dyn UserRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
        rng: StdRng,
    ) -> Self {
        Self {
            users,
            pull_requests,
            rng: Mutex::new(rng),
        }
    }

    /// Opens a pull request and assigns up to two reviewers from the author's
    /// team. Zero eligible teammates is not an error.
    #[instrument(skip_all, fields(pr_id = %id, author_id = %author_id))]
    pub async fn create_pr(
        &self,
        id: PullRequestId,
        name: impl Into<String>,
        author_id: UserId,
    ) -> Result<PullRequest, ReviewError> {
        if self.pull_requests.pull_request_exists(id).await? {
            warn!("pull request already exists");
            return Err(ReviewError::AlreadyExists {
                entity: EntityKind::PullRequest,
                id: id.to_string(),
            });
        }

        let author = self
            .users
            .get_user(author_id)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to load author"))?;

        let members = self.users.users_by_team(&author.team_name).await?;
        let candidates = selection::review_candidates(&members, author.id);
        let reviewers = self.draw(|rng| {
            selection::pick_reviewers(&candidates, MAX_REVIEWERS, rng)
        });

        info!(
            team_name = %author.team_name,
            candidates = candidates.len(),
            selected = reviewers.len(),
            "reviewers assigned"
        );

        let pr = PullRequest::open(id, name, author_id, reviewers, Timestamp::now());
        self.pull_requests.create_pull_request(pr.clone()).await?;

        info!("pull request created");
        Ok(pr)
    }

    /// Marks a pull request merged. Merging an already merged pull request
    /// returns it unchanged.
    #[instrument(skip_all, fields(pr_id = %id))]
    pub async fn merge_pr(&self, id: PullRequestId) -> Result<PullRequest, ReviewError> {
        let mut pr = self.pull_requests.get_pull_request(id).await?;

        if !pr.merge(Timestamp::now()) {
            info!("pull request already merged");
            return Ok(pr);
        }

        self.pull_requests.update_pull_request(pr.clone()).await?;
        info!("pull request merged");
        Ok(pr)
    }

    /// Replaces `old_reviewer` with a random active teammate of theirs who is
    /// neither the author nor already assigned. Returns the updated pull
    /// request and the new reviewer.
    #[instrument(skip_all, fields(pr_id = %id, old_reviewer_id = %old_reviewer))]
    pub async fn reassign_reviewer(
        &self,
        id: PullRequestId,
        old_reviewer: UserId,
    ) -> Result<(PullRequest, UserId), ReviewError> {
        let mut pr = self.pull_requests.get_pull_request(id).await?;

        if pr.is_merged() {
            warn!("cannot reassign on merged pull request");
            return Err(ReviewError::PullRequestMerged { id: id.to_string() });
        }

        if !pr.has_reviewer(old_reviewer) {
            warn!("reviewer not assigned to pull request");
            return Err(ReviewError::NotAssigned {
                pull_request: id.to_string(),
                reviewer: old_reviewer.to_string(),
            });
        }

        let reviewer = self.users.get_user(old_reviewer).await?;
        let members = self.users.users_by_team(&reviewer.team_name).await?;
        let candidates =
            selection::replacement_candidates(&members, pr.author_id(), pr.assigned_reviewers());

        let Some(replacement) = self.draw(|rng| selection::pick_one(&candidates, rng)) else {
            warn!(team_name = %reviewer.team_name, "no replacement candidates available");
            return Err(ReviewError::NoCandidate {
                team: reviewer.team_name.to_string(),
            });
        };

        pr.replace_reviewer(old_reviewer, replacement);
        self.pull_requests.update_pull_request(pr.clone()).await?;

        info!(new_reviewer_id = %replacement, "reviewer reassigned");
        Ok((pr, replacement))
    }

    /// Pull requests on which `user_id` is an assigned reviewer.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn get_user_reviews(&self, user_id: UserId) -> Result<Vec<PullRequest>, ReviewError> {
        let prs = self.pull_requests.pull_requests_by_reviewer(user_id).await?;
        debug!(count = prs.len(), "user reviews retrieved");
        Ok(prs)
    }

    // The guard never lives across an await point.
    fn draw<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}
