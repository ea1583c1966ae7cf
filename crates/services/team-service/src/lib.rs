//! Team Service Library
//!
//! This crate provides persistence for teams through a generic repository
//! over SeaORM, the schema migrations it needs, and the administration
//! commands used by the `team-service` binary.

pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;

use tracing::info;

use crate::commands::TeamCommand;
use crate::config::TeamServiceConfig;
use crate::infra::Database;
use crate::repository::TeamRepository;

/// Connect to the configured database (applying migrations) and build the
/// team repository on top of it.
pub async fn connect_repository(config: &TeamServiceConfig) -> Result<TeamRepository, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    Ok(TeamRepository::new(db.get_connection()))
}

/// Run a team administration command and print its output.
pub async fn run_team_command(command: TeamCommand) -> Result<(), Box<dyn std::error::Error>> {
    let config = TeamServiceConfig::from_env();
    let repo = connect_repository(&config).await?;

    let output = commands::execute(&repo, command).await?;
    println!("{}", output);

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = TeamServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.reset().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
