//! Provider failures surface unchanged, classified by kind.

use futures::TryStreamExt;

use common::{AppError, DatabaseConfig};
use domain::{PageRequest, Team};
use team_service_lib::infra::Database;
use team_service_lib::repository::{CrudRepository, TeamRepository};

/// Repository whose pool has been shut down underneath it.
async fn closed_repository() -> TeamRepository {
    let db = Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    let connection = db.get_connection();
    let repo = TeamRepository::new(connection.clone());
    connection.close().await.expect("close pool");
    repo
}

#[tokio::test]
async fn test_find_by_id_reports_connection_error() {
    let repo = closed_repository().await;

    let err = repo.find_by_id(1).await.unwrap_err();

    assert!(err.is_connection(), "{:?}", err);
    assert_eq!(err.code(), "CONNECTION_ERROR");
}

#[tokio::test]
async fn test_count_reports_connection_error() {
    let repo = closed_repository().await;

    assert!(matches!(repo.count().await, Err(AppError::Connection(_))));
}

#[tokio::test]
async fn test_writes_report_connection_error() {
    let repo = closed_repository().await;

    assert!(repo.save(Team::new("teamA")).await.unwrap_err().is_connection());
    assert!(repo.delete_by_id(1).await.unwrap_err().is_connection());
    assert!(repo.delete_all().await.unwrap_err().is_connection());
}

#[tokio::test]
async fn test_reads_report_connection_error() {
    let repo = closed_repository().await;
    let request = PageRequest::of(0, 10).unwrap();

    assert!(repo.find_page(&request).await.unwrap_err().is_connection());
    assert!(repo.exists_by_id(1).await.unwrap_err().is_connection());

    let streamed: Result<Vec<Team>, AppError> = repo.stream_all().try_collect().await;
    assert!(streamed.unwrap_err().is_connection());
}
