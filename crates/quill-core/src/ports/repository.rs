use async_trait::async_trait;

use crate::domain::{Category, NewCategory, NewPost, Post, PostWithCategory};
use crate::error::RepoError;

/// Generic repository trait defining the operations the admin screens need.
///
/// `T` is the stored entity, `N` its not-yet-stored form and `ID` the
/// identity type.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Fetch every entity, in store order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity; the store assigns its identity.
    async fn create(&self, entity: N) -> Result<T, RepoError>;

    /// Write an existing entity back in place.
    ///
    /// Returns [`RepoError::NotFound`] when no row carries its identity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, NewCategory, i32> {}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, i32> {
    /// Fetch every post alongside its category, in store order.
    async fn find_all_with_category(&self) -> Result<Vec<PostWithCategory>, RepoError>;
}
