// src/bin/api_server.rs

use anyhow::Context;
use credential_store::infra::{config, telemetry};
use credential_store::transport;
use credential_store::{open_store, CredentialService, PasswordHasher};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    // --- Identity Store Initialization ---
    let store = open_store(&config::database_url(), config::max_connections()?)
        .await
        .context("failed to open identity store")?;

    // --- Service Initialization ---
    let hasher = PasswordHasher::new(config::bcrypt_cost()?)?;
    tracing::info!(bcrypt_cost = hasher.cost(), "credential service ready");
    let app_state = transport::http::AppState::new(store.clone(), CredentialService::new(store, hasher));

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, "API server listening (Swagger UI at /swagger-ui)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
