use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;
use crate::error::DomainError;

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum content length, in characters.
pub const CONTENT_MAX_LEN: usize = 10_000;

/// Post entity - a single blog entry.
///
/// `author` and `author_email` are captured from the authenticated caller
/// at creation time and are never settable from a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by the given caller.
    pub fn new(
        author: impl Into<String>,
        author_email: impl Into<String>,
        title: String,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author: author.into(),
            // Emails are stored lowercase so ownership lookups stay consistent.
            author_email: author_email.into().to_lowercase(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given caller may edit this post: owner or admin.
    pub fn can_edit(&self, caller_id: &str, role: Role) -> bool {
        role.is_admin() || self.author == caller_id
    }

    /// Whether the given caller may delete this post. Same rule as editing.
    pub fn can_delete(&self, caller_id: &str, role: Role) -> bool {
        self.can_edit(caller_id, role)
    }

    /// Validate and normalize a title: trimmed, 1 to 200 characters.
    pub fn validate_title(raw: &str) -> Result<String, DomainError> {
        let title = raw.trim();
        if title.is_empty() || title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Title must be between 1 and {} characters",
                TITLE_MAX_LEN
            )));
        }
        Ok(title.to_string())
    }

    /// Validate and normalize content: trimmed, 1 to 10000 characters.
    pub fn validate_content(raw: &str) -> Result<String, DomainError> {
        let content = raw.trim();
        if content.is_empty() || content.chars().count() > CONTENT_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Content must be between 1 and {} characters",
                CONTENT_MAX_LEN
            )));
        }
        Ok(content.to_string())
    }

    /// Apply a partial update to title/content and refresh `updated_at`.
    pub fn apply_update(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_owned_by(author: &str) -> Post {
        Post::new(author, "owner@example.com", "Title".into(), "Content".into())
    }

    #[test]
    fn owner_can_edit_and_delete() {
        let post = post_owned_by("u1");
        assert!(post.can_edit("u1", Role::User));
        assert!(post.can_delete("u1", Role::User));
    }

    #[test]
    fn admin_can_edit_any_post() {
        let post = post_owned_by("u1");
        assert!(post.can_edit("someone-else", Role::Admin));
        assert!(post.can_delete("someone-else", Role::Admin));
    }

    #[test]
    fn other_user_is_denied() {
        let post = post_owned_by("u1");
        assert!(!post.can_edit("u2", Role::User));
        assert!(!post.can_delete("u2", Role::User));
    }

    #[test]
    fn ownership_check_is_not_symmetric() {
        // Swapping owner and caller must not grant access.
        let post = post_owned_by("u1");
        assert!(post.can_edit("u1", Role::User));
        let swapped = post_owned_by("u2");
        assert!(!swapped.can_edit("u1", Role::User));
    }

    #[test]
    fn new_post_lowercases_author_email() {
        let post = Post::new("u1", "User@Example.COM", "T".into(), "C".into());
        assert_eq!(post.author_email, "user@example.com");
    }

    #[test]
    fn titles_are_trimmed_and_bounded() {
        assert_eq!(Post::validate_title("  Hello  ").unwrap(), "Hello");
        assert!(Post::validate_title("   ").is_err());
        assert!(Post::validate_title(&"x".repeat(201)).is_err());
        assert!(Post::validate_title(&"x".repeat(200)).is_ok());
    }

    #[test]
    fn content_is_trimmed_and_bounded() {
        assert_eq!(Post::validate_content(" body ").unwrap(), "body");
        assert!(Post::validate_content("").is_err());
        assert!(Post::validate_content(&"x".repeat(10_001)).is_err());
        assert!(Post::validate_content(&"x".repeat(10_000)).is_ok());
    }

    #[test]
    fn apply_update_touches_only_given_fields() {
        let mut post = post_owned_by("u1");
        let created = post.created_at;

        post.apply_update(Some("New title".into()), None);

        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "Content");
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= created);
    }
}
