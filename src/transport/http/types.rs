use crate::app::{CredentialService, IdentityQuery};
use crate::domain::ErrorDetail;
use crate::storage::IdentityStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub identities: Arc<IdentityQuery>,
    pub store: Arc<dyn IdentityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn IdentityStore>, credentials: CredentialService) -> Self {
        Self {
            credentials: Arc::new(credentials),
            identities: Arc::new(IdentityQuery::new(store.clone())),
            store,
        }
    }
}

/// Body of `POST /register` and `POST /login`.
///
/// Missing fields deserialize as empty strings so they hit the same validation message as
/// explicitly empty ones. No `Debug` impl: the password must not end up in logs.
#[derive(Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// OpenAPI description of [`crate::domain::Envelope`]. Exactly one of `data` / `error` is present.
///
/// Documentation only, never constructed: `Envelope<T>` is generic over every payload and
/// stays free of transport concerns, so the wire shape is described once here with `data`
/// as an untyped object. `router::tests` checks the two stay in step.
#[derive(ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    pub error: Option<ErrorDetail>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}
