//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use blog_core::ports::PostRepository;
use blog_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::database::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
    pub started_at: Instant,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (db, posts): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let repo = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                        (Some(conn), repo)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryPostRepository::new()))
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryPostRepository::new()))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, posts): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repository");
            (None, Arc::new(InMemoryPostRepository::new()))
        };

        tracing::info!("Application state initialized");

        Self {
            posts,
            db,
            started_at: Instant::now(),
        }
    }

    /// State wired to an explicit repository. Used by tests.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            posts,
            db: None,
            started_at: Instant::now(),
        }
    }
}
