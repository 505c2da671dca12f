use crate::transport::http::handlers::common::{bad_request, reply, INVALID_BODY};
use crate::transport::http::types::{ApiResponse, AppState, CredentialsRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Identity created; data is {id, username}", body = ApiResponse),
        (status = 400, description = "Empty field or malformed body", body = ApiResponse),
        (status = 409, description = "Username already in use", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    request: Result<Json<CredentialsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "rejected register body");
            return bad_request(INVALID_BODY);
        }
    };

    let result = state
        .credentials
        .register(&request.username, &request.password)
        .await;
    reply(result, StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials accepted; data is {id, username}", body = ApiResponse),
        (status = 400, description = "Empty field or malformed body", body = ApiResponse),
        (status = 401, description = "Invalid username or password", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<CredentialsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "rejected login body");
            return bad_request(INVALID_BODY);
        }
    };

    let result = state
        .credentials
        .authenticate(&request.username, &request.password)
        .await;
    reply(result, StatusCode::OK)
}
