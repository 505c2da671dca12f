pub mod identity;

pub use identity::{open_store, IdentityStore, PostgresIdentityStore, SqliteIdentityStore, StoreError};
