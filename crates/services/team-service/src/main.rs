//! Team Service - administration CLI for the team store.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use team_service_lib::commands::TeamCommand;
use team_service_lib::config::TeamServiceConfig;
use team_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "team-service")]
#[command(about = "Team store administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Team management commands
    Teams {
        #[command(subcommand)]
        action: TeamCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum TeamCommands {
    /// List teams one page at a time
    List {
        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: i64,
        #[arg(long, default_value = "20")]
        size: i64,
        /// Sort spec, e.g. "name,desc;id"
        #[arg(long, default_value = "")]
        sort: String,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single team
    Show { id: i64 },
    /// Create a team (or overwrite the one with --id)
    Add {
        name: String,
        #[arg(long)]
        id: Option<i64>,
    },
    /// Rename a team
    Rename { id: i64, name: String },
    /// Remove a team
    Remove { id: i64 },
    /// Count stored teams
    Count,
    /// Remove every team
    Purge {
        /// Confirm the purge
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = TeamServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(service = %config.service.service_name, "configuration loaded");

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            team_service_lib::run_migrations(migrate_action).await?;
        }
        Commands::Teams { action } => {
            let command = match action {
                TeamCommands::List {
                    page,
                    size,
                    sort,
                    json,
                } => TeamCommand::List {
                    page,
                    size,
                    sort,
                    json,
                },
                TeamCommands::Show { id } => TeamCommand::Show { id },
                TeamCommands::Add { name, id } => TeamCommand::Add { name, id },
                TeamCommands::Rename { id, name } => TeamCommand::Rename { id, name },
                TeamCommands::Remove { id } => TeamCommand::Remove { id },
                TeamCommands::Count => TeamCommand::Count,
                TeamCommands::Purge { yes } => {
                    if !yes {
                        eprintln!("refusing to purge without --yes");
                        return Ok(());
                    }
                    TeamCommand::Purge
                }
            };
            team_service_lib::run_team_command(command).await?;
        }
    }

    Ok(())
}
