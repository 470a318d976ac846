use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Pulls the bearer token out of the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    if !headers.contains_key(AUTHORIZATION) {
        return Err(AppError::Auth("Missing authorization header".to_string()));
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))
}

/// Resolves the signed-in user for a set of request headers.
pub fn authenticate(headers: &HeaderMap, config: &AppConfig) -> Result<User, AppError> {
    let token = extract_bearer_token(headers)?;
    validate_token(&token, &config.auth_jwt_secret).map_err(|e| AppError::Auth(e.to_string()))
}

// API-style guard: unauthenticated callers get a 401 JSON body
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &config)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Page-style guard for the patient and practitioner areas.
///
/// A caller without a valid session is sent back to the home route instead of
/// receiving an error, mirroring how the site treats signed-out visitors.
pub async fn signed_in_gate(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &config) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            debug!("Redirecting signed-out request for {}: {}", request.uri().path(), err);
            Redirect::to(&config.home_route).into_response()
        }
    }
}
