//! Session token issuing and verification
//!
//! Sessions are HS256-signed JWTs valid for 30 days. Keys are derived once
//! at startup and shared through `AppState`.
//!
//! Verification pins the expected algorithm: a token whose header names any
//! other algorithm is rejected as a bad signature instead of being checked
//! with whatever the token asks for.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Lifetime of a session token
pub const SESSION_TTL_DAYS: i64 = 30;

/// Signing algorithm accepted by this server
const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Token verification failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature or algorithm does not match")]
    BadSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token expired")]
    Expired,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for session tokens
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        // Expiry is checked against the caller's clock in `verify`
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
        }
    }

    /// Issue a session token for a user, valid for 30 days from `now`
    pub fn issue(&self, user_id: i64, now: DateTime<Utc>) -> Result<String> {
        let exp = now + Duration::days(SESSION_TTL_DAYS);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(SESSION_ALGORITHM), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Verify signature and algorithm first, then expiry against `now`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        let claims = token_data.claims;
        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Session lifetime in seconds, used for the cookie max-age
    #[inline]
    pub fn session_ttl_secs(&self) -> i64 {
        Duration::days(SESSION_TTL_DAYS).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_test_service();
        let now = Utc::now();

        let token = service.issue(42, now).unwrap();
        let claims = service.verify(&token, now).unwrap();

        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, (now + Duration::days(30)).timestamp());
    }

    #[test]
    fn test_token_valid_until_exact_expiry() {
        let service = create_test_service();
        let now = Utc::now();
        let token = service.issue(1, now).unwrap();

        assert!(service.verify(&token, now + Duration::days(30)).is_ok());
        assert_eq!(
            service.verify(&token, now + Duration::days(30) + Duration::seconds(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_expired_after_31_days() {
        let service = create_test_service();
        let now = Utc::now();
        let token = service.issue(1, now).unwrap();

        let result = service.verify(&token, now + Duration::days(31));
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let now = Utc::now();
        let token = JwtService::new("other-secret").issue(1, now).unwrap();

        let result = create_test_service().verify(&token, now);
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_other_algorithm_is_bad_signature() {
        let now = Utc::now();
        let claims = Claims {
            sub: "1".to_string(),
            exp: (now + Duration::days(1)).timestamp(),
            iat: now.timestamp(),
        };
        // Same secret, different HMAC variant
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let result = create_test_service().verify(&token, now);
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let service = create_test_service();
        let now = Utc::now();
        let original = service.issue(1, now).unwrap();
        let forged = service.issue(2, now).unwrap();

        // Splice user 2's payload onto user 1's signature
        let original_parts: Vec<&str> = original.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!(
            "{}.{}.{}",
            original_parts[0], forged_parts[1], original_parts[2]
        );

        assert_eq!(service.verify(&spliced, now), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = create_test_service();
        assert_eq!(
            service.verify("invalid.token.here", Utc::now()),
            Err(TokenError::Malformed)
        );
        assert_eq!(service.verify("", Utc::now()), Err(TokenError::Malformed));
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Should be cheap due to Arc
    }

    #[test]
    fn test_session_ttl_secs() {
        assert_eq!(create_test_service().session_ttl_secs(), 30 * 24 * 60 * 60);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_issue_verify_round_trip(user_id in 1i64..i64::MAX, offset_secs in 0i64..2_592_000) {
            let service = create_test_service();
            let now = Utc::now();
            let token = service.issue(user_id, now).unwrap();

            let claims = service.verify(&token, now + Duration::seconds(offset_secs)).unwrap();
            prop_assert_eq!(claims.user_id(), Some(user_id));
        }
    }
}
