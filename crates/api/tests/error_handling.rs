//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router or
//! store is involved.

use anime_api::error::AppError;
use anime_core::error::CoreError;
use anime_db::StoreError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::Request;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Anime",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Anime with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("name: must not be blank".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name: must not be blank");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: Unauthorized carries the Basic challenge, Forbidden does not
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401_with_challenge() {
    let response = AppError::Core(CoreError::Unauthorized("nope".into())).into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[WWW_AUTHENTICATE],
        r#"Basic realm="animes", charset="UTF-8""#
    );
}

#[tokio::test]
async fn forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::Forbidden("ADMIN role required".into()));
    let response = err.into_response();
    assert!(response.headers().get(WWW_AUTHENTICATE).is_none());

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "ADMIN role required");
}

// ---------------------------------------------------------------------------
// Test: store errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_constraint_returns_400_validation_error() {
    let err = AppError::Store(StoreError::Constraint("ck_animes_name_not_blank".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name: The anime name cannot be blank or null");
}

#[tokio::test]
async fn store_database_error_is_sanitized() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: extractor rejections are folded into the JSON envelope
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Deserialize)]
struct Named {
    #[allow(dead_code)]
    name: String,
}

#[tokio::test]
async fn json_data_rejection_returns_400_validation_error() {
    let request = Request::builder()
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"name": 5}"#))
        .unwrap();
    let rejection: JsonRejection = Json::<Named>::from_request(request, &()).await.unwrap_err();

    let (status, json) = error_to_response(AppError::from(rejection)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_content_type_rejection_returns_400_bad_request() {
    let request = Request::builder()
        .body(axum::body::Body::from(r#"{"name": "DBZ"}"#))
        .unwrap();
    let rejection: JsonRejection = Json::<Named>::from_request(request, &()).await.unwrap_err();

    let (status, json) = error_to_response(AppError::from(rejection)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn query_rejection_returns_400_bad_request() {
    let (mut parts, ()) = Request::builder()
        .uri("/animes/find")
        .body(())
        .unwrap()
        .into_parts();
    let rejection: QueryRejection = Query::<Named>::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    let (status, json) = error_to_response(AppError::from(rejection)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("name"));
}
