// ABOUTME: JWT-based session tokens and bcrypt password hashing
// ABOUTME: Handles token generation, validation with detailed errors, and credential verification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication and Session Management
//!
//! Sessions are stateless HS256 tokens whose subject is the user id.
//! Password hashing runs on the blocking pool so bcrypt never stalls the
//! async executor.

use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use liftshare_core::constants::{auth::GENERATED_SECRET_BYTES, INVALID_TOKEN};
use liftshare_core::errors::{AppError, AppResult};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Reasons a session token can be refused
#[derive(Debug, Clone, thiserror::Error)]
pub enum JwtValidationError {
    /// Token lifetime has passed
    #[error("session token expired at {}", .expired_at.format("%Y-%m-%d %H:%M:%S UTC"))]
    TokenExpired {
        /// Expiry instant from the `exp` claim
        expired_at: DateTime<Utc>,
    },
    /// Signature or claims did not verify
    #[error("session token rejected: {reason}")]
    TokenInvalid {
        /// Verification failure
        reason: String,
    },
    /// Not a three-part JWT
    #[error("session token is not a JWT: {details}")]
    TokenMalformed {
        /// Decoder message
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(INVALID_TOKEN).with_source(other),
        }
    }
}

/// `JWT` claims for user sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError::TokenMalformed`] if the subject is not an integer id
    pub fn user_id(&self) -> Result<i64, JwtValidationError> {
        self.sub
            .parse()
            .map_err(|_| JwtValidationError::TokenMalformed {
                details: format!("Subject '{}' is not a user id", self.sub),
            })
    }
}

/// Authentication manager for `JWT` session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from an HS256 secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Configured token lifetime
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT` encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the signature is wrong, the token is
    /// expired, or the token is not a well-formed `JWT`
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e, token, &self.decoding_key))
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(
        e: &jsonwebtoken::errors::Error,
        token: &str,
        key: &DecodingKey,
    ) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => {
                // Signature already verified; re-read claims without exp to report when
                let mut relaxed = Validation::new(Algorithm::HS256);
                relaxed.validate_exp = false;
                let expired_at = decode::<Claims>(token, key, &relaxed)
                    .ok()
                    .and_then(|data| DateTime::from_timestamp(data.claims.exp, 0))
                    .unwrap_or_else(Utc::now);
                tracing::debug!("JWT token expired at {}", expired_at.to_rfc3339());
                JwtValidationError::TokenExpired { expired_at }
            }
            ErrorKind::InvalidSignature => {
                tracing::warn!("JWT token signature verification failed");
                JwtValidationError::TokenInvalid {
                    reason: "Token signature verification failed".into(),
                }
            }
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Generate a random hex-encoded `JWT` secret
#[must_use]
pub fn generate_jwt_secret() -> String {
    let mut secret = [0u8; GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut secret);
    hex::encode(secret)
}

/// Hash a plaintext password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an error if the hashing task panics or bcrypt rejects the input
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash
///
/// # Errors
///
/// Returns an error if the verification task panics or the stored hash is unreadable
pub async fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            email: "lifter@example.com".to_owned(),
            password_hash: None,
            name: "Lifter".to_owned(),
            google_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new(b"unit-test-secret", 24);
        let token = manager.generate_token(&test_user()).unwrap();
        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "lifter@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = AuthManager::new(b"secret-a", 24);
        let verifier = AuthManager::new(b"secret-b", 24);
        let token = issuer.generate_token(&test_user()).unwrap();
        assert!(matches!(
            verifier.validate_token(&token),
            Err(JwtValidationError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_expired_token_reports_expiry() {
        let manager = AuthManager::new(b"unit-test-secret", -1);
        let token = manager.generate_token(&test_user()).unwrap();
        let error = manager.validate_token(&token).unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenExpired { .. }));
        assert_eq!(AppError::from(error).http_status(), 401);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = AuthManager::new(b"unit-test-secret", 24);
        assert!(matches!(
            manager.validate_token("not-a-jwt"),
            Err(JwtValidationError::TokenMalformed { .. })
        ));
    }

    #[test]
    fn test_generated_secret_is_hex() {
        let secret = generate_jwt_secret();
        assert_eq!(secret.len(), GENERATED_SECRET_BYTES * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(secret, generate_jwt_secret());
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("hunter2", 4).await.unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).await.unwrap());
        assert!(!verify_password("hunter3", &hash).await.unwrap());
    }
}
