// ABOUTME: Authentication route handlers for registration, login, and session management
// ABOUTME: Issues session tokens and handles password changes for the current user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! Login failures return the same message whether the email is unknown,
//! the password is wrong, or the account has no password.

use super::authenticate;
use crate::auth::verify_password;
use crate::database::{NewUser, UserUpdate};
use crate::logging::AppLogger;
use crate::models::PublicUser;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use liftshare_core::constants::{CURRENT_PASSWORD_INCORRECT, INVALID_CREDENTIALS};
use liftshare_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: Option<String>,
    /// Plaintext password
    pub password: Option<String>,
    /// Display name
    pub name: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: Option<String>,
    /// Plaintext password
    pub password: Option<String>,
}

/// Password change request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Password currently stored for the account
    pub current_password: Option<String>,
    /// Replacement password
    pub new_password: Option<String>,
}

/// Response for register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Human readable status
    pub message: String,
    /// Session token for the `Authorization` header
    pub token: String,
    /// Public user fields
    pub user: PublicUser,
}

/// Response for the current-user endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    /// Public user fields
    pub user: PublicUser,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable status
    pub message: String,
}

/// Trimmed non-empty value of an optional field
fn required(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Accept addresses shaped like `local@domain.tld`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !host.starts_with('.') && !host.ends_with('.')
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/me", get(Self::handle_me))
            .route("/api/auth/change-password", put(Self::handle_change_password))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, AppError>,
    ) -> Result<Response, AppError> {
        let (Some(email), Some(password), Some(name)) = (
            required(body.email.as_ref()),
            body.password.as_deref().filter(|p| !p.is_empty()),
            required(body.name.as_ref()),
        ) else {
            return Err(AppError::missing_field(
                "All fields (email, password, name) are required",
            ));
        };

        if !is_valid_email(email) {
            return Err(AppError::invalid_input("Please provide a valid email address"));
        }

        let new_user = NewUser {
            email: email.to_owned(),
            password: Some(password.to_owned()),
            name: name.to_owned(),
            google_id: None,
        };
        let user = resources
            .database
            .users()
            .create(&new_user, resources.bcrypt_cost())
            .await?;
        let token = resources.auth_manager.generate_token(&user)?;

        AppLogger::log_auth_event(Some(user.id), "register", true);

        let response = AuthResponse {
            message: "User registered successfully".to_owned(),
            token,
            user: user.to_public(),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, AppError>,
    ) -> Result<Response, AppError> {
        let (Some(email), Some(password)) = (
            required(body.email.as_ref()),
            body.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::missing_field("Email and password are required"));
        };

        let user = resources.database.users().get_by_email(email).await?;
        let credential = user
            .as_ref()
            .and_then(|u| u.password_hash.as_deref().map(|hash| (u, hash)));

        let verified = if let Some((user, hash)) = credential {
            verify_password(password, hash).await?.then_some(user)
        } else {
            // unknown and password-less accounts pay the same bcrypt cost as a real one
            let decoy = resources.decoy_password_hash().await?;
            verify_password(password, decoy).await?;
            None
        };

        let Some(user) = verified else {
            AppLogger::log_auth_event(user.as_ref().map(|u| u.id), "login", false);
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        let token = resources.auth_manager.generate_token(user)?;
        AppLogger::log_auth_event(Some(user.id), "login", true);

        let response = AuthResponse {
            message: "Login successful".to_owned(),
            token,
            user: user.to_public(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/auth/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let response = MeResponse {
            user: auth.user,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/auth/change-password
    async fn handle_change_password(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<ChangePasswordRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Json(body) = body?;

        let (Some(current_password), Some(new_password)) = (
            body.current_password.as_deref().filter(|p| !p.is_empty()),
            body.new_password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::missing_field(
                "Current password and new password are required",
            ));
        };

        let stored_hash = resources
            .database
            .users()
            .get_by_id(auth.user_id)
            .await?
            .and_then(|user| user.password_hash);
        let Some(stored_hash) = stored_hash.as_deref() else {
            return Err(AppError::invalid_input(
                "Account has no password; sign in with your identity provider",
            ));
        };

        if !verify_password(current_password, stored_hash).await? {
            AppLogger::log_auth_event(Some(auth.user_id), "change_password", false);
            return Err(AppError::invalid_input(CURRENT_PASSWORD_INCORRECT));
        }

        let update = UserUpdate {
            password: Some(new_password.to_owned()),
            ..UserUpdate::default()
        };
        resources
            .database
            .users()
            .update(auth.user_id, &update, resources.bcrypt_cost())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        AppLogger::log_auth_event(Some(auth.user_id), "change_password", true);

        let response = MessageResponse {
            message: "Password changed successfully".to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
