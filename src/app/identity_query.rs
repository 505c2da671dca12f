//! Read-only identity lookups.

use crate::domain::{IdentityError, PublicIdentity};
use crate::storage::{IdentityStore, StoreError};
use std::sync::Arc;

pub struct IdentityQuery {
    store: Arc<dyn IdentityStore>,
}

impl IdentityQuery {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Fetches the public profile for `id`. No password material is read on this path.
    pub async fn get_public_identity(&self, id: i64) -> Result<PublicIdentity, IdentityError> {
        match self.store.find_by_id(id).await {
            Ok(identity) => Ok(identity),
            Err(StoreError::NotFound) => Err(IdentityError::NotFound),
            Err(e) => {
                tracing::error!(user_id = id, error = %e, "identity lookup failed");
                Err(IdentityError::Internal)
            }
        }
    }
}
