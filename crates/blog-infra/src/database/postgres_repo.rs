//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest, PostSort};
use blog_core::ports::{PostFilter, PostRepository};

use super::entity::post::{self, Entity as PostEntity};

/// SeaORM-backed implementation of the post repository port.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn select_for(filter: &PostFilter) -> Select<PostEntity> {
        match filter {
            PostFilter::All => PostEntity::find(),
            PostFilter::Search(term) => {
                let pattern = format!("%{}%", term);
                PostEntity::find().filter(
                    Condition::any()
                        .add(Expr::col(post::Column::Title).ilike(pattern.clone()))
                        .add(Expr::col(post::Column::Content).ilike(pattern)),
                )
            }
        }
    }
}

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => query_err(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn paginate(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let query = Self::select_for(filter);

        let windowed = match request.sort {
            PostSort::CreatedAtDesc => query.clone().order_by_desc(post::Column::CreatedAt),
            PostSort::CreatedAtAsc => query.clone().order_by_asc(post::Column::CreatedAt),
        }
        .offset(request.offset())
        .limit(request.limit);

        // Count and fetch run concurrently; neither depends on the other.
        let (total_docs, models) =
            futures::try_join!(query.count(&self.db), windowed.all(&self.db))
                .map_err(query_err)?;

        let docs = models.into_iter().map(Into::into).collect();
        Ok(Page::assemble(docs, total_docs, request))
    }
}
