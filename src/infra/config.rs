//! Centralized configuration (environment variables + defaults).
//!
//! Callers are expected to have run `dotenv::dotenv()` first so a local `.env` is picked up.

use crate::crypto::password::DEFAULT_COST;
use anyhow::Context;
use std::str::FromStr;

/// Database URL. `sqlite:` and `postgres://` URLs are both accepted.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://users.db".to_string())
}

/// Connection pool size.
pub fn max_connections() -> anyhow::Result<u32> {
    parse_or("DB_MAX_CONNECTIONS", 5)
}

/// HTTP listen address.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// bcrypt cost factor for new hashes. Existing hashes verify at whatever cost they carry.
pub fn bcrypt_cost() -> anyhow::Result<u32> {
    parse_or("BCRYPT_COST", DEFAULT_COST)
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number (got {:?})", key, raw)),
        Err(_) => Ok(default),
    }
}
