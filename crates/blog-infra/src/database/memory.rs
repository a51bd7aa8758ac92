//! In-memory post repository.
//!
//! Used when `DATABASE_URL` is not configured (or unreachable) and by the
//! API integration tests. Search is a case-insensitive substring match on
//! title and content.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest, PostSort};
use blog_core::ports::{PostFilter, PostRepository};

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &PostFilter, post: &Post) -> bool {
    match filter {
        PostFilter::All => true,
        PostFilter::Search(term) => {
            let term = term.to_lowercase();
            post.title.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term)
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }

    async fn paginate(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut matching: Vec<Post> = posts
            .values()
            .filter(|p| matches(filter, p))
            .cloned()
            .collect();

        match request.sort {
            PostSort::CreatedAtDesc => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            PostSort::CreatedAtAsc => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        let total_docs = matching.len() as u64;
        let docs: Vec<Post> = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit as usize)
            .collect();

        Ok(Page::assemble(docs, total_docs, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sample_post(n: i64) -> Post {
        let mut post = Post::new(
            format!("user{}", n),
            format!("user{}@example.com", n),
            format!("Post {}", n),
            format!("Content of post {}", n),
        );
        // Spread creation times so ordering is deterministic.
        post.created_at += TimeDelta::seconds(n);
        post.updated_at = post.created_at;
        post
    }

    async fn seeded(count: i64) -> InMemoryPostRepository {
        let repo = InMemoryPostRepository::new();
        for n in 0..count {
            repo.insert(sample_post(n)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn paginate_returns_at_most_limit_docs() {
        let repo = seeded(15).await;

        let page = repo
            .paginate(&PostFilter::All, PageRequest::new(1, 10))
            .await
            .unwrap();

        assert_eq!(page.docs.len(), 10);
        assert_eq!(page.total_docs, 15);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next_page);
        assert!(!page.has_prev_page);
    }

    #[tokio::test]
    async fn paginate_second_page_holds_the_remainder() {
        let repo = seeded(15).await;

        let page = repo
            .paginate(&PostFilter::All, PageRequest::new(2, 10))
            .await
            .unwrap();

        assert_eq!(page.docs.len(), 5);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[tokio::test]
    async fn paginate_sorts_newest_first_by_default() {
        let repo = seeded(3).await;

        let page = repo
            .paginate(&PostFilter::All, PageRequest::new(1, 10))
            .await
            .unwrap();

        assert_eq!(page.docs[0].title, "Post 2");
        assert_eq!(page.docs[2].title, "Post 0");
    }

    #[tokio::test]
    async fn paginate_beyond_last_page_is_empty() {
        let repo = seeded(5).await;

        let page = repo
            .paginate(&PostFilter::All, PageRequest::new(4, 10))
            .await
            .unwrap();

        assert!(page.docs.is_empty());
        assert!(!page.has_next_page);
        assert_eq!(page.total_docs, 5);
    }

    #[tokio::test]
    async fn search_matches_title_and_content_case_insensitively() {
        let repo = InMemoryPostRepository::new();
        repo.insert(Post::new("u1", "u1@x.com", "Rust tips".into(), "Nothing".into()))
            .await
            .unwrap();
        repo.insert(Post::new("u2", "u2@x.com", "Other".into(), "All about RUST".into()))
            .await
            .unwrap();
        repo.insert(Post::new("u3", "u3@x.com", "Unrelated".into(), "Gardening".into()))
            .await
            .unwrap();

        let page = repo
            .paginate(&PostFilter::Search("rust".into()), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_docs, 2);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_the_second_time() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(sample_post(1)).await.unwrap();

        repo.delete(post.id).await.unwrap();
        let second = repo.delete(post.id).await;

        assert!(matches!(second, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn update_of_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let ghost = sample_post(1);

        let result = repo.update(ghost).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
