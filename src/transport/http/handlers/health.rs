use crate::domain::Envelope;
use crate::transport::http::types::{ApiResponse, AppState, HealthStatus};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn index_handler() -> &'static str {
    "Credential Store API v1.0"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (DB reachable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (DB unreachable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Envelope::success(HealthStatus {
                status: "ok".to_string(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check: identity store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Envelope::<HealthStatus>::failure("Identity store unreachable")),
            )
                .into_response()
        }
    }
}
