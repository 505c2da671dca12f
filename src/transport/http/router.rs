use crate::domain::{ErrorDetail, PublicIdentity};
use crate::transport::http::handlers::{auth, health, users};
use crate::transport::http::types::{ApiResponse, AppState, CredentialsRequest, HealthStatus};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        auth::register_handler,
        auth::login_handler,
        users::get_user_handler
    ),
    components(schemas(
        ApiResponse,
        ErrorDetail,
        PublicIdentity,
        CredentialsRequest,
        HealthStatus
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/register", post(auth::register_handler))
        .route("/login", post(auth::login_handler))
        .route("/users/:id", get(users::get_user_handler))
        .with_state(app_state)
}
