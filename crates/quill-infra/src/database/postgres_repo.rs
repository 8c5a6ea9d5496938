//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::EntityTrait;

use quill_core::domain::PostWithCategory;
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, PostRepository};

use super::entity::category::Entity as CategoryEntity;
use super::entity::post::Entity as PostEntity;
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all_with_category(&self) -> Result<Vec<PostWithCategory>, RepoError> {
        tracing::debug!("Loading posts with their categories");

        let rows = PostEntity::find()
            .find_also_related(CategoryEntity)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(post, category)| PostWithCategory {
                post: post.into(),
                category: category.map(Into::into),
            })
            .collect())
    }
}
