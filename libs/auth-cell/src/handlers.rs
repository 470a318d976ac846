use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::HeaderMap,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::extractor::authenticate;

pub async fn validate_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let user = authenticate(&headers, &config)?;

    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        email: user.email,
        role: user.role,
    }))
}

/// Boolean signed-in check; never fails on a bad token.
pub async fn verify_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    debug!("Verifying token");

    let valid = authenticate(&headers, &config).is_ok();

    Ok(Json(json!({ "valid": valid })))
}

pub async fn get_session(
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Session lookup for user: {}", user.id);

    Ok(Json(json!({
        "signed_in": true,
        "user_id": user.id,
        "email": user.email,
        "role": user.role,
        "signed_in_at": user.created_at,
    })))
}
