//! Repository layer for data access.

mod base;
pub mod entities;
mod query;
mod sea_repository;
mod team_repository;

pub use base::{CrudRepository, Persistable, PrimaryKeyOf};
pub use query::STREAM_BATCH_SIZE;
pub use sea_repository::SeaRepository;
pub use team_repository::TeamRepository;

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use team_repository::MockTeamRepository;
