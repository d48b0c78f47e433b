// ABOUTME: Bearer token authentication for protected routes
// ABOUTME: Validates the session token and resolves its subject to a stored user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::database::Database;
use crate::models::PublicUser;
use liftshare_core::constants::INVALID_TOKEN;
use liftshare_core::errors::{AppError, AppResult};
use std::sync::Arc;

/// Result of a successful authentication
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user id
    pub user_id: i64,
    /// Authenticated user without credentials
    pub user: PublicUser,
}

/// Resolves `Authorization` headers to users
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when the header is missing or not a bearer
    /// token, `AuthExpired` for an expired token, and `AuthInvalid` for a
    /// bad signature, a malformed token, or an unknown subject
    #[tracing::instrument(
        skip(self, auth_header),
        fields(
            auth_method = tracing::field::Empty,
            user_id = tracing::field::Empty,
            success = tracing::field::Empty,
        )
    )]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(header) = auth_header else {
            tracing::debug!("Authentication failed: missing authorization header");
            tracing::Span::current().record("success", false);
            return Err(AppError::auth_required());
        };

        let Some(token) = header.strip_prefix("Bearer ") else {
            tracing::Span::current()
                .record("auth_method", "INVALID")
                .record("success", false);
            tracing::debug!("Authentication failed: authorization header is not a bearer token");
            return Err(AppError::auth_required());
        };

        tracing::Span::current().record("auth_method", "JWT_TOKEN");
        match self.authenticate_jwt_token(token.trim()).await {
            Ok(result) => {
                tracing::Span::current()
                    .record("user_id", result.user_id)
                    .record("success", true);
                tracing::debug!(user_id = result.user_id, "JWT authentication successful");
                Ok(result)
            }
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::warn!("JWT authentication failed: {}", e);
                Err(e)
            }
        }
    }

    /// Validate a token and load its user
    async fn authenticate_jwt_token(&self, token: &str) -> AppResult<AuthResult> {
        let claims = self.auth_manager.validate_token(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .database
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid(INVALID_TOKEN))?;

        Ok(AuthResult {
            user_id,
            user: user.to_public(),
        })
    }
}
