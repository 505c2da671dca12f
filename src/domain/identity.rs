use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The public projection of an identity. This is the only identity shape that ever
/// leaves the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicIdentity {
    pub id: i64,
    pub username: String,
}

/// What the store hands back for a credential check. Never serialized.
#[derive(Clone)]
pub struct StoredCredential {
    pub id: i64,
    pub password_hash: String,
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("id", &self.id)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_hash() {
        let cred = StoredCredential {
            id: 7,
            password_hash: "$2b$04$abcdefghijklmnopqrstuu".to_string(),
        };
        let rendered = format!("{:?}", cred);
        assert!(rendered.contains("id: 7"));
        assert!(!rendered.contains("$2b$"));
    }
}
