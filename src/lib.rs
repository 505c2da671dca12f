pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CredentialService, IdentityQuery};
pub use crypto::PasswordHasher;
pub use domain::{Envelope, IdentityError, PublicIdentity};
pub use storage::{open_store, IdentityStore, SqliteIdentityStore, StoreError};
