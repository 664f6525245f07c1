use crate::models::{Item, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// RepositoryError
///
/// Storage failures surfaced to handlers, which map them to a 500.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository Trait
///
/// Persistence contract used by handlers and the `AuthUser` extractor. Handlers
/// only see the trait, so tests swap in in-memory stubs.
#[async_trait]
pub trait Repository: Send + Sync {
    // Every row of the `items` table.
    async fn get_items(&self) -> Result<Vec<Item>, RepositoryError>;

    // Profile lookup for an authenticated subject. `None` when the user is unknown
    // or the lookup fails.
    async fn get_user(&self, id: Uuid) -> Option<User>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_items(&self) -> Result<Vec<Item>, RepositoryError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, name, description FROM items")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, email, name, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(user_id = %id, error = %e, "profile lookup failed");
                None
            })
    }
}
