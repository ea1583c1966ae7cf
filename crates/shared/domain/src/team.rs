//! Team domain entity.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TEAM_NAME_LENGTH, MIN_TEAM_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Surrogate key of a stored team.
pub type TeamId = i64;

/// Team domain entity
///
/// `id` is `None` until the team has been saved; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TeamId>,
    pub name: String,
}

impl Team {
    /// Create an unsaved team
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Create a team with a pre-assigned key
    pub fn with_id(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Check if the team has not been persisted yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Rename the team
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Check the name against the column limits.
    pub fn validate(&self) -> DomainResult<()> {
        let len = self.name.trim().chars().count();
        if len < MIN_TEAM_NAME_LENGTH {
            return Err(DomainError::validation("team name must not be blank"));
        }
        if self.name.chars().count() > MAX_TEAM_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "team name must be at most {} characters",
                MAX_TEAM_NAME_LENGTH
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{} {}", id, self.name),
            None => write!(f, "(unsaved) {}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_team_has_no_key() {
        let team = Team::new("teamA");
        assert!(team.is_new());
        assert_eq!(team.name, "teamA");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(Team::new("   ").validate().is_err());
        assert!(Team::new("teamB").validate().is_ok());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let team = Team::new("x".repeat(MAX_TEAM_NAME_LENGTH + 1));
        assert!(matches!(team.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn display_shows_key_when_saved() {
        assert_eq!(Team::with_id(7, "teamA").to_string(), "#7 teamA");
        assert_eq!(Team::new("teamA").to_string(), "(unsaved) teamA");
    }

    #[test]
    fn unsaved_team_serializes_without_id() {
        let json = serde_json::to_value(Team::new("teamA")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "teamA" }));
    }
}
