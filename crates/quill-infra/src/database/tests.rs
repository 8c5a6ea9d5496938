#[cfg(test)]
mod tests {
    use crate::database::entity::{category, post};
    use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};
    use quill_core::domain::{Category, NewCategory, Post};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn category_model(id: i32, name: &str) -> category::Model {
        let now = chrono::Utc::now();
        category::Model {
            id,
            name: name.to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn post_model(id: i32, category_id: Option<i32>, title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            category_id,
            title: title.to_owned(),
            body: "Content".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(3, Some(1), "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(3).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 3);
        assert_eq!(post.category_id, Some(1));
    }

    #[tokio::test]
    async fn test_find_missing_category_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<category::Model>::new()])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_id(99999).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_all_categories_in_store_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                category_model(2, "Rust"),
                category_model(1, "News"),
            ]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let all: Vec<Category> = repo.find_all().await.unwrap();
        assert_eq!(
            all.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
    }

    #[tokio::test]
    async fn test_create_category_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category_model(5, "News")]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let created: Category = repo
            .create(NewCategory::new("News".to_string()))
            .await
            .unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(created.name, "News");
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<category::Model>::new()])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let ghost: Category = category_model(99999, "ghost").into();
        let result: Result<Category, RepoError> = repo.update(ghost).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_all_with_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![(
                post_model(1, Some(4), "Hello"),
                category_model(4, "News"),
            )]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let rows = repo.find_all_with_category().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].post.title, "Hello");
        assert_eq!(rows[0].category.as_ref().unwrap().name, "News");
    }
}
