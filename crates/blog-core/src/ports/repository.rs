use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Filter applied to paginated post listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    /// Every post.
    All,
    /// Posts whose title or content matches the term (case-insensitive).
    Search(String),
}

/// Post repository - the persistence gateway for the sole entity.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Persist a new post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Persist changes to an existing post.
    /// Returns `RepoError::NotFound` if the post no longer exists.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by ID. `RepoError::NotFound` if it was already gone.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Count matching posts and fetch one window of them.
    ///
    /// Implementations run the count and the fetch concurrently and join
    /// the results via `Page::assemble`.
    async fn paginate(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError>;
}
