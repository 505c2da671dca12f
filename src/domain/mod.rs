//! Domain types shared by the services and the transport layer.

pub mod envelope;
pub mod error;
pub mod identity;

pub use envelope::{Envelope, ErrorDetail};
pub use error::IdentityError;
pub use identity::{PublicIdentity, StoredCredential};
