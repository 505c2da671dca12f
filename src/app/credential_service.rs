//! Registration and authentication.
//!
//! This service turns raw credentials into stored identities and checks them later. It
//! owns the classification of storage and hashing faults into [`IdentityError`]: nothing
//! below this layer reaches a caller unchanged.

use crate::crypto::password::MAX_PASSWORD_BYTES;
use crate::crypto::{HashError, PasswordHasher};
use crate::domain::error::{LOGIN_FIELDS_REQUIRED, PASSWORD_TOO_LONG, REGISTER_FIELDS_REQUIRED};
use crate::domain::{IdentityError, PublicIdentity};
use crate::storage::{IdentityStore, StoreError};
use std::sync::Arc;

pub struct CredentialService {
    store: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
}

impl CredentialService {
    pub fn new(store: Arc<dyn IdentityStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Creates a new identity. Uniqueness is decided by the store's constraint, so two
    /// racing registrations of one username get one success and one `UsernameTaken`.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<PublicIdentity, IdentityError> {
        if username.is_empty() || password.is_empty() {
            return Err(IdentityError::Validation(REGISTER_FIELDS_REQUIRED));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(IdentityError::Validation(PASSWORD_TOO_LONG));
        }

        let password_hash = self
            .hasher
            .hash(password)
            .await
            .map_err(|e| hashing_failure("register", username, e))?;

        match self.store.insert(username, &password_hash).await {
            Ok(id) => {
                tracing::info!(user_id = id, username, "identity registered");
                Ok(PublicIdentity {
                    id,
                    username: username.to_string(),
                })
            }
            Err(StoreError::Conflict) => {
                tracing::debug!(username, "registration rejected: username taken");
                Err(IdentityError::UsernameTaken)
            }
            Err(e) => Err(storage_failure("register", username, e)),
        }
    }

    /// Checks a username/password pair. An unknown username and a wrong password produce
    /// the same `InvalidCredentials`, and both pay for one bcrypt verification. A password
    /// too long to have been registered is just a wrong password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<PublicIdentity, IdentityError> {
        if username.is_empty() || password.is_empty() {
            return Err(IdentityError::Validation(LOGIN_FIELDS_REQUIRED));
        }

        let stored = match self.store.find_by_username(username).await {
            Ok(stored) => stored,
            Err(StoreError::NotFound) => {
                self.hasher
                    .verify_decoy(password)
                    .await
                    .map_err(|e| hashing_failure("authenticate", username, e))?;
                tracing::debug!(username, "authentication failed");
                return Err(IdentityError::InvalidCredentials);
            }
            Err(e) => return Err(storage_failure("authenticate", username, e)),
        };

        let matches = self
            .hasher
            .verify(password, &stored.password_hash)
            .await
            .map_err(|e| hashing_failure("authenticate", username, e))?;
        if !matches {
            tracing::debug!(username, "authentication failed");
            return Err(IdentityError::InvalidCredentials);
        }

        tracing::info!(user_id = stored.id, username, "authentication succeeded");
        Ok(PublicIdentity {
            id: stored.id,
            username: username.to_string(),
        })
    }
}

fn storage_failure(operation: &'static str, username: &str, err: StoreError) -> IdentityError {
    tracing::error!(operation, username, error = %err, "identity store failure");
    IdentityError::Internal
}

fn hashing_failure(operation: &'static str, username: &str, err: HashError) -> IdentityError {
    tracing::error!(operation, username, error = %err, "password hashing failure");
    IdentityError::Internal
}
