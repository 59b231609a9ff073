//! Shared helpers for the HTTP integration tests.
//!
//! Requests go straight into the router via `tower::ServiceExt::oneshot`,
//! with no TCP listener involved.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use anime_api::auth::basic::BasicCredentials;
use anime_api::auth::credentials::CredentialStore;
use anime_api::auth::policy::AccessPolicy;
use anime_api::config::{parse_users, LogFormat, ServerConfig, DEFAULT_USERS};
use anime_api::router::build_app_router;
use anime_api::state::AppState;
use anime_db::repositories::MemoryAnimeStore;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// USER-only account from the default credential table.
pub const USER: (&str, &str) = ("luissfmt", "academy");
/// USER + ADMIN account from the default credential table.
pub const ADMIN: (&str, &str) = ("devdojo", "academy");
/// Account holding ADMIN without USER; only the test table has it.
pub const ADMIN_ONLY: (&str, &str) = ("auditor", "ledger");

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
        users: parse_users(DEFAULT_USERS).unwrap(),
        log_format: LogFormat::Pretty,
    }
}

/// Argon2 hashing is slow, so the credential table is built once per test binary.
///
/// The default accounts plus [`ADMIN_ONLY`].
fn credentials() -> Arc<CredentialStore> {
    static CREDENTIALS: OnceLock<Arc<CredentialStore>> = OnceLock::new();
    CREDENTIALS
        .get_or_init(|| {
            let raw = format!("{DEFAULT_USERS};{}:{}:ADMIN", ADMIN_ONLY.0, ADMIN_ONLY.1);
            let users = parse_users(&raw).unwrap();
            Arc::new(CredentialStore::from_entries(&users).unwrap())
        })
        .clone()
}

/// A router over a fresh in-memory store, plus a handle for seeding it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryAnimeStore>,
}

/// Build the full application router with all middleware layers, exactly
/// as `main.rs` does, over an empty in-memory store.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryAnimeStore::new());
    let state = AppState {
        store: store.clone(),
        credentials: credentials(),
        policy: Arc::new(AccessPolicy::anime_api()),
        config: Arc::new(test_config()),
    };

    TestApp {
        router: build_app_router(state),
        store,
    }
}

/// `Authorization` header value for the given account.
pub fn authorization((username, password): (&str, &str)) -> String {
    BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }
    .to_header_value()
}

/// Send a request, optionally with Basic credentials and a JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(creds) = auth {
        builder = builder.header(AUTHORIZATION, authorization(creds));
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, auth: (&str, &str)) -> Response {
    send(app, Method::GET, uri, Some(auth), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    auth: (&str, &str),
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(auth), Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    auth: (&str, &str),
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(auth), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, auth: (&str, &str)) -> Response {
    send(app, Method::DELETE, uri, Some(auth), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
