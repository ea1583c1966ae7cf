//! Team administration commands.
//!
//! Each command runs against any `CrudRepository<Team, TeamId>` and returns
//! the text to print, so the handlers stay independent of the terminal.

use common::{AppError, AppResult, OptionExt};
use domain::{Page, PageRequest, Sort, Team, TeamId};

use crate::repository::CrudRepository;

/// A team administration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamCommand {
    List {
        page: i64,
        size: i64,
        sort: String,
        json: bool,
    },
    Show {
        id: TeamId,
    },
    Add {
        name: String,
        id: Option<TeamId>,
    },
    Rename {
        id: TeamId,
        name: String,
    },
    Remove {
        id: TeamId,
    },
    Count,
    Purge,
}

/// Execute a command and render its outcome.
pub async fn execute(
    repo: &dyn CrudRepository<Team, TeamId>,
    command: TeamCommand,
) -> AppResult<String> {
    match command {
        TeamCommand::List {
            page,
            size,
            sort,
            json,
        } => {
            let request = PageRequest::of(page, size)?.with_sort(Sort::parse(&sort)?);
            let page = repo.find_page(&request).await?;
            if json {
                serde_json::to_string_pretty(&page).map_err(|e| AppError::internal(e.to_string()))
            } else {
                Ok(render_page(&page))
            }
        }
        TeamCommand::Show { id } => {
            let team = repo
                .find_by_id(id)
                .await?
                .ok_or_not_found(format!("team {}", id))?;
            Ok(team.to_string())
        }
        TeamCommand::Add { name, id } => {
            let team = match id {
                Some(id) => Team::with_id(id, name),
                None => Team::new(name),
            };
            team.validate()?;
            let saved = repo.save(team).await?;
            Ok(format!("saved {}", saved))
        }
        TeamCommand::Rename { id, name } => {
            let mut team = repo
                .find_by_id(id)
                .await?
                .ok_or_not_found(format!("team {}", id))?;
            team.rename(name);
            team.validate()?;
            let saved = repo.save(team).await?;
            Ok(format!("renamed {}", saved))
        }
        TeamCommand::Remove { id } => {
            if !repo.exists_by_id(id).await? {
                return Ok(format!("team {} does not exist, nothing removed", id));
            }
            repo.delete_by_id(id).await?;
            Ok(format!("removed team {}", id))
        }
        TeamCommand::Count => Ok(repo.count().await?.to_string()),
        TeamCommand::Purge => {
            let total = repo.count().await?;
            repo.delete_all().await?;
            Ok(format!("removed {} teams", total))
        }
    }
}

fn render_page(page: &Page<Team>) -> String {
    let mut lines: Vec<String> = page.content.iter().map(Team::to_string).collect();
    lines.push(format!(
        "page {}/{} ({} of {} teams)",
        page.number() + 1,
        page.total_pages().max(1),
        page.number_of_elements(),
        page.total_elements
    ));
    lines.join("\n")
}
