//! Shared fixtures for repository integration tests.

use common::DatabaseConfig;
use domain::Team;
use team_service_lib::infra::Database;
use team_service_lib::repository::{CrudRepository, TeamRepository};

/// Fresh, migrated in-memory database per test.
pub async fn repository() -> TeamRepository {
    let db = Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    TeamRepository::new(db.get_connection())
}

/// Save unsaved teams with the given names, returning them with keys.
pub async fn seed(repo: &TeamRepository, names: &[&str]) -> Vec<Team> {
    repo.save_all(names.iter().map(|name| Team::new(*name)).collect())
        .await
        .expect("seed teams")
}
