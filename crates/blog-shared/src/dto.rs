//! Data Transfer Objects - request/response types for the API.
//!
//! All wire fields are camelCase; the domain stays snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::pagination::Page;

/// Request body for creating a post.
///
/// Any extra fields (notably `author`) are ignored: ownership always
/// comes from the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Request body for updating a post. Both fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as rendered on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            author_email: post.author_email,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Pagination block attached to list/search responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_docs: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> From<&Page<T>> for PaginationMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.page,
            total_pages: page.total_pages,
            total_docs: page.total_docs,
            has_next_page: page.has_next_page,
            has_prev_page: page.has_prev_page,
        }
    }
}

/// Body of `GET /api/posts` and `GET /api/posts/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: PaginationMeta,
}

impl From<Page<Post>> for PostListResponse {
    fn from(page: Page<Post>) -> Self {
        let pagination = PaginationMeta::from(&page);
        Self {
            posts: page.docs.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}

/// Body of `GET /api/posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinglePostResponse {
    pub post: PostResponse,
}

/// Body of the mutating endpoints: a human message plus the post,
/// or just the message for deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMutationResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
}

impl PostMutationResponse {
    pub fn with_post(message: impl Into<String>, post: Post) -> Self {
        Self {
            message: message.into(),
            post: Some(post.into()),
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            post: None,
        }
    }
}
