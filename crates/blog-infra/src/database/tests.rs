use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            author: "u1".to_owned(),
            author_email: "u1@example.com".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.id, post_id);
    assert_eq!(found.author, "u1");
}

#[tokio::test]
async fn test_find_post_by_id_absent() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}
