pub mod password;

pub use password::{HashError, PasswordHasher};
