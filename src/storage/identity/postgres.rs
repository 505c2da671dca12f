//! PostgreSQL-backed identity store.

use super::{IdentityStore, StoreError};
use crate::domain::{PublicIdentity, StoredCredential};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresIdentityStore {
    pool: PgPool,
}

impl PostgresIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("SELECT id, username, password_hash FROM users LIMIT 0")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Schema)?;
        Ok(())
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<StoredCredential, StoreError> {
        let (id, password_hash) = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        Ok(StoredCredential { id, password_hash })
    }

    async fn find_by_id(&self, id: i64) -> Result<PublicIdentity, StoreError> {
        let (id, username) =
            sqlx::query_as::<_, (i64, String)>("SELECT id, username FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound)?;
        Ok(PublicIdentity { id, username })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Connects to `TEST_POSTGRES_URL`, or returns `None` so the test is skipped.
    async fn store() -> Option<PostgresIdentityStore> {
        dotenv::dotenv().ok();
        let url = std::env::var("TEST_POSTGRES_URL").ok()?;
        let store = PostgresIdentityStore::connect(&url, 2).await.unwrap();
        store.initialize().await.unwrap();
        Some(store)
    }

    // The table is shared with whatever else uses the database, so names must not collide.
    fn unique_name(base: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{}-{}-{}", base, std::process::id(), nanos)
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let Some(store) = store().await else {
            eprintln!("TEST_POSTGRES_URL not set; skipping");
            return;
        };
        store.initialize().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let Some(store) = store().await else {
            eprintln!("TEST_POSTGRES_URL not set; skipping");
            return;
        };
        let name = unique_name("alice");
        let id = store.insert(&name, "h1").await.unwrap();
        assert!(id > 0);
        assert!(matches!(
            store.insert(&name, "h2").await,
            Err(StoreError::Conflict)
        ));

        let stored = store.find_by_username(&name).await.unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.password_hash, "h1");
        assert_eq!(
            store.find_by_id(id).await.unwrap(),
            PublicIdentity { id, username: name }
        );
    }

    #[tokio::test]
    async fn lookups_miss_with_not_found() {
        let Some(store) = store().await else {
            eprintln!("TEST_POSTGRES_URL not set; skipping");
            return;
        };
        assert!(matches!(
            store.find_by_username(&unique_name("nobody")).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.find_by_id(-1).await, Err(StoreError::NotFound)));
        store.ping().await.unwrap();
    }
}
