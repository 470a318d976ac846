use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use shared_models::auth::{JwtClaims, JwtHeader, User};

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    #[error("JWT secret is not set")]
    MissingSecret,

    #[error("Invalid token format")]
    Malformed,

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid signature encoding")]
    SignatureEncoding,

    #[error("Invalid token signature")]
    SignatureMismatch,

    #[error("Invalid claims format")]
    Claims,

    #[error("Token expired")]
    Expired,
}

/// Verifies an HS256 token issued by the identity provider and returns the caller.
///
/// Only the signature, the algorithm and `exp` are checked. Audience and issuer
/// belong to the issuer's contract and are passed through untouched.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<User, JwtError> {
    if jwt_secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let mut parts = token.split('.');
    let (header_b64, claims_b64, signature_b64) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(c), Some(s), None) => (h, c, s),
        _ => return Err(JwtError::Malformed),
    };

    let header: JwtHeader = decode_segment(header_b64, JwtError::Malformed)?;
    if header.alg != "HS256" {
        return Err(JwtError::UnsupportedAlgorithm(header.alg));
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        JwtError::SignatureEncoding
    })?;

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| JwtError::MissingSecret)?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(claims_b64.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err(JwtError::SignatureMismatch);
    }

    let claims: JwtClaims = decode_segment(claims_b64, JwtError::Claims)?;

    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp().max(0) as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err(JwtError::Expired);
        }
    }

    let created_at = claims
        .iat
        .and_then(|timestamp| Utc.timestamp_opt(timestamp as i64, 0).single());

    let user = User {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        metadata: claims.user_metadata,
        created_at,
    };

    debug!("Token validated successfully for user: {}", user.id);
    Ok(user)
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str, on_error: JwtError) -> Result<T, JwtError> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|_| on_error.clone())?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!("Failed to parse token segment: {}", e);
        on_error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};
    use assert_matches::assert_matches;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_valid_token_yields_user() {
        let user = TestUser::patient("sarah.ahmed@email.com");
        let token = JwtTestUtils::create_test_token(&user, SECRET, Some(1));

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.id, user.id);
        assert_eq!(validated.email.as_deref(), Some("sarah.ahmed@email.com"));
        assert_eq!(validated.role.as_deref(), Some("patient"));
        assert!(validated.created_at.is_some());
    }

    #[test]
    fn test_rejections() {
        let user = TestUser::default();

        assert_matches!(validate_token("a.b.c", ""), Err(JwtError::MissingSecret));
        assert_matches!(validate_token("only.two", SECRET), Err(JwtError::Malformed));
        assert_matches!(
            validate_token(&JwtTestUtils::create_expired_token(&user, SECRET), SECRET),
            Err(JwtError::Expired)
        );
        assert_matches!(
            validate_token(&JwtTestUtils::create_invalid_signature_token(&user), SECRET),
            Err(JwtError::SignatureMismatch)
        );
        assert_matches!(
            validate_token(&JwtTestUtils::create_malformed_token(), SECRET),
            Err(JwtError::Malformed)
        );
    }
}
