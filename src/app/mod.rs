pub mod credential_service;
pub mod identity_query;

pub use credential_service::CredentialService;
pub use identity_query::IdentityQuery;
