//! Persistent identity table.
//!
//! The store owns the `users` rows and is the single point that enforces username
//! uniqueness. Engine errors are classified into [`StoreError`] here and nowhere else.

pub mod postgres;
pub mod sqlite;

use crate::domain::{PublicIdentity, StoredCredential};
use async_trait::async_trait;
use std::sync::Arc;

pub use postgres::PostgresIdentityStore;
pub use sqlite::SqliteIdentityStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The username uniqueness constraint rejected the write.
    #[error("username already exists")]
    Conflict,
    #[error("identity not found")]
    NotFound,
    #[error("unsupported database url scheme `{0}`")]
    UnsupportedUrl(String),
    /// A pre-existing `users` table is missing one of the expected columns.
    #[error("users table has an unexpected shape: {0}")]
    Schema(#[source] sqlx::Error),
    #[error(transparent)]
    Backend(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
            other => StoreError::Backend(other),
        }
    }
}

/// Storage contract for identities.
///
/// Implementations must make `insert` atomic with respect to the uniqueness check:
/// concurrent inserts of one username yield exactly one id and `Conflict` for the rest.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Creates the `users` table if absent and checks that it has the expected columns.
    /// Safe to call on every start.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Inserts a new identity and returns its assigned id.
    async fn insert(&self, username: &str, password_hash: &str) -> Result<i64, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<StoredCredential, StoreError>;

    /// Projection lookup; never reads `password_hash`.
    async fn find_by_id(&self, id: i64) -> Result<PublicIdentity, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Connects to the store named by `url` (`sqlite:` or `postgres://`) and initializes it.
pub async fn open_store(
    url: &str,
    max_connections: u32,
) -> Result<Arc<dyn IdentityStore>, StoreError> {
    let store: Arc<dyn IdentityStore> = if url.starts_with("sqlite:") {
        Arc::new(SqliteIdentityStore::connect(url, max_connections).await?)
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Arc::new(PostgresIdentityStore::connect(url, max_connections).await?)
    } else {
        let scheme = url.split(':').next().unwrap_or_default().to_string();
        return Err(StoreError::UnsupportedUrl(scheme));
    };

    store.initialize().await?;
    tracing::info!(max_connections, "identity store initialized");
    Ok(store)
}
