//! Caller-facing failure taxonomy.
//!
//! Every storage or hashing fault is classified into exactly one of these variants at the
//! service boundary. The `Display` text is what callers see, so it must never carry
//! engine detail.

pub const REGISTER_FIELDS_REQUIRED: &str = "Username and password cannot be empty";
pub const LOGIN_FIELDS_REQUIRED: &str = "Username and password are required";
pub const PASSWORD_TOO_LONG: &str = "Password cannot be longer than 72 bytes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(&'static str),
    #[error("Username already in use")]
    UsernameTaken,
    /// Covers both an unknown username and a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error("Internal server error")]
    Internal,
}
