//! Paged reads against in-memory SQLite.

mod support;

use common::AppError;
use domain::{PageRequest, Sort, Team};
use team_service_lib::repository::CrudRepository;

use support::{repository, seed};

#[tokio::test]
async fn test_first_page_of_five() {
    let repo = repository().await;
    seed(&repo, &["a", "b", "c", "d", "e"]).await;

    let page = repo
        .find_page(&PageRequest::at_offset(0, 2).unwrap())
        .await
        .unwrap();

    assert_eq!(page.number_of_elements(), 2);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages(), 3);
    assert!(page.has_next());
}

#[tokio::test]
async fn test_offset_four_of_five_returns_last_team() {
    let repo = repository().await;
    let saved = seed(&repo, &["a", "b", "c", "d", "e"]).await;

    let page = repo
        .find_page(&PageRequest::at_offset(4, 2).unwrap())
        .await
        .unwrap();

    assert_eq!(page.content, vec![saved[4].clone()]);
    assert_eq!(page.total_elements, 5);
    assert!(page.is_last());
}

#[tokio::test]
async fn test_page_beyond_end_is_empty() {
    let repo = repository().await;
    seed(&repo, &["a", "b"]).await;

    let page = repo
        .find_page(&PageRequest::of(5, 10).unwrap())
        .await
        .unwrap();

    assert!(!page.has_content());
    assert_eq!(page.total_elements, 2);
}

#[tokio::test]
async fn test_pages_walk_sorted_content() {
    let repo = repository().await;
    seed(&repo, &["d", "b", "e", "a", "c"]).await;

    let mut request = PageRequest::of(0, 2).unwrap().with_sort(Sort::by("name"));
    let mut names = Vec::new();
    loop {
        let page = repo.find_page(&request).await.unwrap();
        names.extend(page.content.iter().map(|t: &Team| t.name.clone()));
        if page.is_last() {
            break;
        }
        request = request.next();
    }

    assert_eq!(names, ["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_unknown_sort_property_is_invalid_argument() {
    let repo = repository().await;
    seed(&repo, &["a"]).await;

    let request = PageRequest::of(0, 10).unwrap().with_sort(Sort::by("created_at"));
    let err = repo.find_page(&request).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_negative_page_request_is_invalid_argument() {
    let err: AppError = PageRequest::at_offset(-1, 2).unwrap_err().into();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    let err: AppError = PageRequest::of(0, -2).unwrap_err().into();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_matching_page_filters_before_counting() {
    use sea_orm::{ColumnTrait, Condition};
    use team_service_lib::repository::entities::team;

    let repo = repository().await;
    seed(&repo, &["red devils", "blue jays", "red sox", "red wings"]).await;

    let page = repo
        .find_page_matching(
            Condition::all().add(team::Column::Name.starts_with("red")),
            &PageRequest::of(0, 2).unwrap().with_sort(Sort::by_desc("name")),
        )
        .await
        .unwrap();

    assert_eq!(page.total_elements, 3);
    let names: Vec<&str> = page.content.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["red wings", "red sox"]);
    assert_eq!(
        repo.count_matching(Condition::all().add(team::Column::Name.starts_with("red")))
            .await
            .unwrap(),
        3
    );
}
