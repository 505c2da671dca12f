use crate::transport::http::handlers::common::{bad_request, reply, INVALID_USER_ID};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "Numeric user id")
    ),
    responses(
        (status = 200, description = "Public profile {id, username}", body = ApiResponse),
        (status = 400, description = "Id is not an integer", body = ApiResponse),
        (status = 404, description = "User not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_user_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(v) => v,
        Err(_) => return bad_request(INVALID_USER_ID),
    };

    reply(state.identities.get_public_identity(id).await, StatusCode::OK)
}
