//! Route handlers, one module per resource.

pub mod pull_request;
pub mod team;
pub mod user;
