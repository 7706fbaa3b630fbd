//! Reviewer-assignment domain for the PR reviewer service.
//!
//! This crate contains the identifiers, entity types, error taxonomy and
//! repository ports of the service, together with the services that apply
//! the business rules: team creation, user activity toggling, and pull-request
//! creation, merging and reviewer reassignment.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! Storage is reached only through the traits in [`repository`]; the
//! `storage` crate supplies the in-memory implementation and the `api` crate
//! exposes the services over HTTP.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`UserId`, `PullRequestId`, `TeamName`) |
//! | [`types`] | Entities (`User`, `Team`, `PullRequest`) and `Timestamp` |
//! | [`errors`] | `RepositoryError`, `ReviewError`, `EntityKind` |
//! | [`repository`] | Storage port traits |
//! | [`service`] | `TeamService`, `UserService`, `PullRequestService` |

pub mod errors;
pub mod identifiers;
pub mod repository;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{EntityKind, RepositoryError, ReviewError};
pub use identifiers::{PullRequestId, TeamName, UserId};
pub use repository::{PullRequestRepository, TeamRepository, UserRepository};
pub use service::{PullRequestService, TeamService, UserService, MAX_REVIEWERS};
pub use types::{PullRequest, PullRequestStatus, Team, TeamMember, Timestamp, User};
