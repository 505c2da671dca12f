//! End-to-end HTTP test: serve the router on an ephemeral port and drive it with reqwest.

use async_trait::async_trait;
use credential_store::domain::StoredCredential;
use credential_store::transport;
use credential_store::{
    CredentialService, IdentityStore, PasswordHasher, PublicIdentity, SqliteIdentityStore,
    StoreError,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

// Engine detail that must never reach a response body.
const ENGINE_DETAIL: &str = "unable to open database file /var/lib/identities/users.db";

/// A store whose backend always fails with a driver error carrying engine detail.
struct UnavailableStore;

fn engine_failure() -> StoreError {
    StoreError::Backend(sqlx::Error::Configuration(ENGINE_DETAIL.into()))
}

#[async_trait]
impl IdentityStore for UnavailableStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Err(engine_failure())
    }
    async fn insert(&self, _: &str, _: &str) -> Result<i64, StoreError> {
        Err(engine_failure())
    }
    async fn find_by_username(&self, _: &str) -> Result<StoredCredential, StoreError> {
        Err(engine_failure())
    }
    async fn find_by_id(&self, _: i64) -> Result<PublicIdentity, StoreError> {
        Err(engine_failure())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(engine_failure())
    }
}

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let store: Arc<dyn IdentityStore> = Arc::new(SqliteIdentityStore::in_memory().await?);
    serve(store).await
}

async fn serve(store: Arc<dyn IdentityStore>) -> Result<String, Box<dyn std::error::Error>> {
    let credentials = CredentialService::new(store.clone(), PasswordHasher::new(4)?);
    let router = transport::http::create_router(transport::http::AppState::new(store, credentials));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_credential_flow() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    // --- Register ---
    let resp = client
        .post(format!("{}/register", base_url))
        .json(&json!({ "username": "alice", "password": "s3cr3t" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": true, "data": { "id": 1, "username": "alice" } })
    );

    let resp = client
        .post(format!("{}/register", base_url))
        .json(&json!({ "username": "alice", "password": "other" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": false, "error": { "message": "Username already in use" } })
    );

    // --- Login ---
    let resp = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": "alice", "password": "s3cr3t" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": true, "data": { "id": 1, "username": "alice" } })
    );

    let wrong_password = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await?;
    let unknown_user = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": "mallory", "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.bytes().await?, unknown_user.bytes().await?);

    // --- Public lookup ---
    let resp = client.get(format!("{}/users/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.json::<Value>().await?;
    assert_eq!(body, json!({ "success": true, "data": { "id": 1, "username": "alice" } }));
    assert!(body["data"].get("password_hash").is_none());

    let resp = client.get(format!("{}/users/999", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": false, "error": { "message": "User not found" } })
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/register", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>().await?["error"]["message"], "Invalid request body");

    let resp = client
        .post(format!("{}/register", base_url))
        .json(&json!({ "username": "alice" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": false, "error": { "message": "Username and password cannot be empty" } })
    );

    let resp = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": "", "password": "" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<Value>().await?["error"]["message"],
        "Username and password are required"
    );

    let resp = client.get(format!("{}/users/abc", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": false, "error": { "message": "Invalid user id" } })
    );

    Ok(())
}

#[tokio::test]
async fn test_http_health_and_banner() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({ "success": true, "data": { "status": "ok" } })
    );

    let banner = client.get(&base_url).send().await?.text().await?;
    assert_eq!(banner, "Credential Store API v1.0");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_store_outage_is_opaque() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = serve(Arc::new(UnavailableStore)).await?;
    let client = reqwest::Client::new();
    let internal = r#"{"success":false,"error":{"message":"Internal server error"}}"#;

    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = resp.text().await?;
    assert_eq!(
        body,
        r#"{"success":false,"error":{"message":"Identity store unreachable"}}"#
    );

    let resp = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": "alice", "password": "s3cr3t" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text().await?, internal);

    let resp = client
        .post(format!("{}/register", base_url))
        .json(&json!({ "username": "alice", "password": "s3cr3t" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text().await?, internal);

    let resp = client.get(format!("{}/users/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp.text().await?;
    assert_eq!(body, internal);
    assert!(!body.contains("users.db"));
    assert!(!body.contains(ENGINE_DETAIL));

    Ok(())
}
