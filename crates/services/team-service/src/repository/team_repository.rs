//! Team repository: the generic repository bound to `Team`, plus typed
//! lookups on the name column.

use sea_orm::{ColumnTrait, Condition};

use common::AppResult;
use domain::{Sort, Team};

use super::entities::team;
use super::sea_repository::SeaRepository;

#[cfg(any(test, feature = "test-utils"))]
use super::base::CrudRepository;
#[cfg(any(test, feature = "test-utils"))]
use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use domain::{Page, PageRequest, TeamId};
#[cfg(any(test, feature = "test-utils"))]
use futures::stream::BoxStream;

/// Repository for `Team` records keyed by `TeamId`.
pub type TeamRepository = SeaRepository<Team>;

impl SeaRepository<Team> {
    /// Find the team with exactly this name
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Team>> {
        self.find_one_matching(Condition::all().add(team::Column::Name.eq(name)))
            .await
    }

    /// Teams whose name contains `fragment`, ordered by name
    pub async fn find_by_name_containing(&self, fragment: &str) -> AppResult<Vec<Team>> {
        self.find_all_matching_sorted(
            Condition::all().add(team::Column::Name.contains(fragment)),
            &Sort::by("name"),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub TeamRepository {}

    #[async_trait]
    impl CrudRepository<Team, TeamId> for TeamRepository {
        async fn save(&self, entity: Team) -> AppResult<Team>;
        async fn save_all(&self, entities: Vec<Team>) -> AppResult<Vec<Team>>;
        async fn find_by_id(&self, id: TeamId) -> AppResult<Option<Team>>;
        async fn exists_by_id(&self, id: TeamId) -> AppResult<bool>;
        async fn find_all(&self) -> AppResult<Vec<Team>>;
        fn stream_all(&self) -> BoxStream<'static, AppResult<Team>>;
        async fn find_all_sorted(&self, sort: &Sort) -> AppResult<Vec<Team>>;
        async fn find_all_by_id(&self, ids: Vec<TeamId>) -> AppResult<Vec<Team>>;
        async fn find_page(&self, request: &PageRequest) -> AppResult<Page<Team>>;
        async fn count(&self) -> AppResult<u64>;
        async fn delete_by_id(&self, id: TeamId) -> AppResult<()>;
        async fn delete(&self, entity: Team) -> AppResult<()>;
        async fn delete_all_by_id(&self, ids: Vec<TeamId>) -> AppResult<()>;
        async fn delete_all_of(&self, entities: Vec<Team>) -> AppResult<()>;
        async fn delete_all(&self) -> AppResult<()>;
    }
}
