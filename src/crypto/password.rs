//! Password hashing policy: bcrypt with a fresh salt per hash, embedded in the output.
//!
//! Hashing and verification are CPU-bound on purpose, so both run on tokio's blocking
//! pool rather than on an executor thread.

use std::sync::Arc;
use tokio::sync::OnceCell;

/// Matches the cost the original deployment stored its hashes with.
pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt only reads this many bytes of its input; the rest would be silently ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

// Only ever hashed to produce the timing decoy below.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("bcrypt cost {0} is outside 4..=31")]
    InvalidCost(u32),
    #[error("password is longer than 72 bytes")]
    PasswordTooLong,
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    decoy: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashError::InvalidCost(cost));
        }
        Ok(Self {
            cost,
            decoy: Arc::new(OnceCell::new()),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Refuses passwords over [`MAX_PASSWORD_BYTES`] instead of letting bcrypt truncate them.
    pub async fn hash(&self, password: &str) -> Result<String, HashError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(HashError::PasswordTooLong);
        }
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// Constant-time check of `password` against a stored bcrypt string. Any `$2a$`,
    /// `$2b$`, `$2x$` or `$2y$` hash verifies at the cost recorded inside it.
    ///
    /// A password over [`MAX_PASSWORD_BYTES`] never matches, since no stored hash can have
    /// been made from it. It still pays for the full verification.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let too_long = password.len() > MAX_PASSWORD_BYTES;
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches && !too_long)
    }

    /// Spends one verification at the configured cost against a throwaway hash, so a
    /// lookup miss takes as long as a wrong password.
    pub async fn verify_decoy(&self, password: &str) -> Result<(), HashError> {
        let decoy = self
            .decoy
            .get_or_try_init(|| self.hash(DECOY_PASSWORD))
            .await?;
        self.verify(password, decoy).await?;
        Ok(())
    }
}
