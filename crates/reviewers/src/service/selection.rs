//! Reviewer candidate filtering and random selection.
//!
//! Candidates are always returned sorted by [`UserId`]. Repositories list team
//! members in arbitrary order, so sorting here is what makes a seeded
//! generator produce the same picks from run to run.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{User, UserId};

/// Upper bound on reviewers assigned to a newly created pull request.
pub const MAX_REVIEWERS: usize = 2;

/// Teammates eligible to review a new pull request: active and not the author.
pub(crate) fn review_candidates(members: &[User], author: UserId) -> Vec<UserId> {
    sorted(
        members
            .iter()
            .filter(|m| m.is_active && m.id != author)
            .map(|m| m.id),
    )
}

/// Teammates eligible to replace a reviewer: active, not the author, and not
/// already assigned. `assigned` still contains the reviewer being replaced,
/// so that reviewer can never be picked as their own replacement.
pub(crate) fn replacement_candidates(
    members: &[User],
    author: UserId,
    assigned: &[UserId],
) -> Vec<UserId> {
    sorted(
        members
            .iter()
            .filter(|m| m.is_active)
            .filter(|m| m.id != author)
            .filter(|m| !assigned.contains(&m.id))
            .map(|m| m.id),
    )
}

/// Picks `min(max, candidates.len())` distinct candidates uniformly at random.
pub(crate) fn pick_reviewers<R: Rng + ?Sized>(
    candidates: &[UserId],
    max: usize,
    rng: &mut R,
) -> Vec<UserId> {
    if candidates.len() <= max {
        return candidates.to_vec();
    }
    candidates.choose_multiple(rng, max).copied().collect()
}

/// Picks a single candidate uniformly at random.
pub(crate) fn pick_one<R: Rng + ?Sized>(candidates: &[UserId], rng: &mut R) -> Option<UserId> {
    candidates.choose(rng).copied()
}

fn sorted(ids: impl Iterator<Item = UserId>) -> Vec<UserId> {
    let mut ids: Vec<UserId> = ids.collect();
    ids.sort_unstable();
    ids
}
