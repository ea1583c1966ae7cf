//! Team database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::{Team, TeamId};

use crate::repository::base::Persistable;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Team {
    fn from(model: Model) -> Self {
        Team {
            id: Some(model.id),
            name: model.name,
        }
    }
}

impl Persistable for Team {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Key = TeamId;

    fn key(&self) -> Option<TeamId> {
        self.id
    }

    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: self.id.map_or(NotSet, Set),
            name: Set(self.name),
        }
    }

    fn from_model(model: Model) -> Self {
        Team::from(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_team_leaves_key_unset() {
        let active = Team::new("teamA").into_active_model();
        assert_eq!(active.id, NotSet);
        assert_eq!(active.name, Set("teamA".to_string()));
    }

    #[test]
    fn saved_team_sets_key() {
        let active = Team::with_id(3, "teamA").into_active_model();
        assert_eq!(active.id, Set(3));
    }

    #[test]
    fn model_maps_back_with_key() {
        let team = Team::from_model(Model {
            id: 9,
            name: "teamB".to_string(),
        });
        assert_eq!(team, Team::with_id(9, "teamB"));
    }
}
