use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    extract::{Extension, State},
    http::{HeaderMap, HeaderValue},
};
use tokio_test::assert_ok;

use auth_cell::handlers::{get_session, validate_token, verify_token};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

fn create_test_config() -> Arc<AppConfig> {
    TestConfig::default().to_arc()
}

fn create_auth_header(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "authorization",
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

#[tokio::test]
async fn test_validate_token_success() {
    let config = create_test_config();
    let user = TestUser::patient("sarah.ahmed@email.com");
    let token = JwtTestUtils::create_test_token(&user, &config.auth_jwt_secret, Some(24));

    let result = validate_token(State(config), create_auth_header(&token)).await;

    let response = assert_ok!(result).0;
    assert!(response.valid);
    assert_eq!(response.user_id, user.id);
    assert_eq!(response.email, Some(user.email));
    assert_eq!(response.role, Some("patient".to_string()));
}

#[tokio::test]
async fn test_validate_token_missing_header() {
    let result = validate_token(State(create_test_config()), HeaderMap::new()).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "Missing authorization header");
}

#[tokio::test]
async fn test_validate_token_no_bearer_prefix() {
    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static("sometoken"));

    let result = validate_token(State(create_test_config()), headers).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "Invalid authorization header format");
}

#[tokio::test]
async fn test_validate_token_expired() {
    let config = create_test_config();
    let token = JwtTestUtils::create_expired_token(&TestUser::default(), &config.auth_jwt_secret);

    let result = validate_token(State(config), create_auth_header(&token)).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "Token expired");
}

#[tokio::test]
async fn test_validate_token_invalid_signature() {
    let token = JwtTestUtils::create_invalid_signature_token(&TestUser::default());

    let result = validate_token(State(create_test_config()), create_auth_header(&token)).await;

    assert_matches!(result, Err(AppError::Auth(_)));
}

#[tokio::test]
async fn test_validate_token_without_secret_configured() {
    let config = Arc::new(AppConfig::default());
    let token = JwtTestUtils::create_test_token(&TestUser::default(), "anything", Some(1));

    let result = validate_token(State(config), create_auth_header(&token)).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "JWT secret is not set");
}

#[tokio::test]
async fn test_verify_token_reports_boolean() {
    let config = create_test_config();
    let doctor = TestUser::doctor("dr.ayesha@clinic.com");
    let good = JwtTestUtils::create_test_token(&doctor, &config.auth_jwt_secret, Some(24));
    let expired = JwtTestUtils::create_expired_token(&doctor, &config.auth_jwt_secret);

    let valid = verify_token(State(config.clone()), create_auth_header(&good)).await.unwrap().0;
    assert_eq!(valid["valid"], true);

    let invalid = verify_token(State(config.clone()), create_auth_header(&expired)).await.unwrap().0;
    assert_eq!(invalid["valid"], false);

    let missing = verify_token(State(config), HeaderMap::new()).await.unwrap().0;
    assert_eq!(missing["valid"], false);
}

#[tokio::test]
async fn test_get_session_echoes_identity() {
    let user = TestUser::patient("hassan.m@email.com");

    let response = get_session(Extension(user.to_user())).await.unwrap().0;

    assert_eq!(response["signed_in"], true);
    assert_eq!(response["user_id"], user.id);
    assert_eq!(response["email"], "hassan.m@email.com");
}
