//! PR reviewer storage adapter.
//!
//! Implements the repository ports defined in [`reviewers::repository`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. It stores
//! and returns records; every assignment and state-transition decision is
//! made by the services in the [`reviewers`] crate.
//!
//! Only the in-memory backend exists today. All state is lost on restart.

mod memory;

pub use memory::InMemoryRepository;
