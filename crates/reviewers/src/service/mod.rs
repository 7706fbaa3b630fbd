//! Application services.
//!
//! Each service holds the repository ports it needs and nothing else; the
//! pull-request service also owns the generator used for reviewer selection.

mod pull_request;
mod selection;
mod team;
mod user;

pub use pull_request::PullRequestService;
pub use selection::MAX_REVIEWERS;
pub use team::TeamService;
pub use user::UserService;
