// ABOUTME: Shared resource container injected into every route handler
// ABOUTME: Holds the database, token manager, auth middleware, and loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared behind an `Arc` as axum router state.

use crate::auth::{hash_password, AuthManager};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::AuthMiddleware;
use liftshare_core::errors::AppResult;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Plaintext behind the decoy hash; never matches a submitted password in practice
const DECOY_PASSWORD: &str = "liftshare-login-decoy";

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Connection pool and managers
    pub database: Arc<Database>,
    /// Session token issuance and validation
    pub auth_manager: Arc<AuthManager>,
    /// Bearer token resolution for protected routes
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Validated startup configuration
    pub config: Arc<ServerConfig>,
    /// bcrypt hash verified when a login has no stored credential to check
    decoy_password_hash: Arc<OnceCell<String>>,
}

impl ServerResources {
    /// Create server resources, deriving the token manager from `config`
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        ));
        let auth_middleware = Arc::new(AuthMiddleware::new(
            Arc::clone(&auth_manager),
            Arc::clone(&database),
        ));

        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
            decoy_password_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Hash at the configured cost, created on first use, for verifying
    /// logins of unknown or password-less accounts
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails
    pub async fn decoy_password_hash(&self) -> AppResult<&str> {
        self.decoy_password_hash
            .get_or_try_init(|| hash_password(DECOY_PASSWORD, self.bcrypt_cost()))
            .await
            .map(String::as_str)
    }

    /// Bcrypt work factor for new credentials
    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.config.auth.bcrypt_cost
    }
}
