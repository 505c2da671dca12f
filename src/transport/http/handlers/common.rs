use crate::domain::{Envelope, IdentityError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_USER_ID: &str = "Invalid user id";

pub fn status_for(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::Validation(_) => StatusCode::BAD_REQUEST,
        IdentityError::UsernameTaken => StatusCode::CONFLICT,
        IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        IdentityError::NotFound => StatusCode::NOT_FOUND,
        IdentityError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wraps a core outcome in an [`Envelope`] with the matching status code.
pub fn reply<T: Serialize>(result: Result<T, IdentityError>, ok_status: StatusCode) -> Response {
    let status = match &result {
        Ok(_) => ok_status,
        Err(e) => status_for(e),
    };
    (status, Json(Envelope::from(result))).into_response()
}

/// A transport-level rejection (unparseable body or path) that never reached the core.
pub fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(Envelope::<()>::failure(message)),
    )
        .into_response()
}
