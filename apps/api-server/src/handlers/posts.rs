//! Post CRUD and search handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::pagination::PageRequest;
use blog_core::ports::PostFilter;
use blog_shared::dto::{PostListResponse, PostMutationResponse, SinglePostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Raw query-string values are kept as strings: unparseable page/limit
/// must fall back to defaults instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let request = PageRequest::from_raw(
        query.page.as_deref(),
        query.limit.as_deref(),
        query.sort.as_deref(),
    );

    let page = state.posts.paginate(&PostFilter::All, request).await?;

    tracing::info!(count = page.docs.len(), total = page.total_docs, "Posts listed");

    Ok(HttpResponse::Ok().json(PostListResponse::from(page)))
}

/// GET /api/posts/search?q=&page=&limit=
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Err(AppError::BadRequest(
                "Search parameter \"q\" is required".to_string(),
            ));
        }
    };

    let request = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref(), None);

    let page = state
        .posts
        .paginate(&PostFilter::Search(term.clone()), request)
        .await?;

    tracing::info!(
        query = %term,
        count = page.docs.len(),
        total = page.total_docs,
        "Post search performed"
    );

    Ok(HttpResponse::Ok().json(PostListResponse::from(page)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    tracing::info!(post_id = %id, "Post fetched");

    Ok(HttpResponse::Ok().json(SinglePostResponse { post: post.into() }))
}

/// POST /api/posts - requires authentication.
///
/// Ownership fields come from the verified identity, never the body.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<blog_shared::dto::CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let title = Post::validate_title(&req.title)?;
    let content = Post::validate_content(&req.content)?;

    let post = Post::new(identity.user_id.as_str(), identity.email.as_str(), title, content);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, author = %saved.author, "Post created");

    Ok(HttpResponse::Created().json(PostMutationResponse::with_post(
        "Post created successfully",
        saved,
    )))
}

/// PUT /api/posts/{id} - requires authentication + owner-or-admin.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<blog_shared::dto::UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.can_edit(&identity.user_id, identity.role) {
        tracing::warn!(
            user = %identity.user_id,
            post_id = %id,
            post_author = %post.author,
            "Unauthorized update attempt"
        );
        return Err(AppError::Forbidden);
    }

    let title = req.title.as_deref().map(Post::validate_title).transpose()?;
    let content = req
        .content
        .as_deref()
        .map(Post::validate_content)
        .transpose()?;

    post.apply_update(title, content);
    let updated = state.posts.update(post).await?;

    tracing::info!(post_id = %id, author = %identity.user_id, "Post updated");

    Ok(HttpResponse::Ok().json(PostMutationResponse::with_post(
        "Post updated successfully",
        updated,
    )))
}

/// DELETE /api/posts/{id} - requires authentication + owner-or-admin.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.can_delete(&identity.user_id, identity.role) {
        tracing::warn!(
            user = %identity.user_id,
            post_id = %id,
            post_author = %post.author,
            "Unauthorized delete attempt"
        );
        return Err(AppError::Forbidden);
    }

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, author = %identity.user_id, "Post deleted");

    Ok(HttpResponse::Ok().json(PostMutationResponse::message_only(
        "Post deleted successfully",
    )))
}
