//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Rows are kept in insertion order so `find_all` mirrors a table scan.
//! Data is lost on process restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{Category, NewCategory, NewPost, Post, PostWithCategory};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository};

struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }

    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory category store.
pub struct InMemoryCategoryRepository {
    table: RwLock<Table<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Category, NewCategory, i32> for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, entity: NewCategory) -> Result<Category, RepoError> {
        let mut table = self.table.write().await;
        let category = Category {
            id: table.next_id(),
            name: entity.name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        };
        table.rows.push(category.clone());
        Ok(category)
    }

    async fn update(&self, entity: Category) -> Result<Category, RepoError> {
        let mut table = self.table.write().await;
        let slot = table
            .rows
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }
}

impl CategoryRepository for InMemoryCategoryRepository {}

/// In-memory post store.
///
/// Holds the category store so the category reference behaves like a
/// foreign key.
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
    categories: Arc<InMemoryCategoryRepository>,
}

impl InMemoryPostRepository {
    pub fn new(categories: Arc<InMemoryCategoryRepository>) -> Self {
        Self {
            table: RwLock::new(Table::new()),
            categories,
        }
    }

    async fn check_category(&self, category_id: Option<i32>) -> Result<(), RepoError> {
        let Some(id) = category_id else {
            return Ok(());
        };
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(RepoError::Constraint(format!(
                "category {} does not exist",
                id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, NewPost, i32> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, entity: NewPost) -> Result<Post, RepoError> {
        self.check_category(entity.category_id).await?;

        let mut table = self.table.write().await;
        let post = Post {
            id: table.next_id(),
            category_id: entity.category_id,
            title: entity.title,
            body: entity.body,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        };
        table.rows.push(post.clone());
        Ok(post)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        self.check_category(entity.category_id).await?;

        let mut table = self.table.write().await;
        let slot = table
            .rows
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all_with_category(&self) -> Result<Vec<PostWithCategory>, RepoError> {
        let posts = self.find_all().await?;
        let categories = self.categories.find_all().await?;

        Ok(posts
            .into_iter()
            .map(|post| {
                let category = post
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id).cloned());
                PostWithCategory { post, category }
            })
            .collect())
    }
}
