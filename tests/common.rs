// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, test configuration, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `liftshare_server`

use anyhow::Result;
use liftshare_server::{
    auth::generate_jwt_secret,
    config::{
        AuthConfig, CorsPolicy, DatabaseConfig, DatabaseUrl, Environment, ServerConfig,
        UploadConfig,
    },
    database::{CreateExerciseRequest, Database, NewUser},
    models::{Exercise, User},
    resources::ServerResources,
    server::LiftshareServer,
};
use std::path::Path;
use std::sync::{Arc, Once};

/// bcrypt cost used by tests; the minimum the library accepts
pub const TEST_BCRYPT_COST: u32 = 4;

/// Password used by [`create_test_user`]
pub const TEST_PASSWORD: &str = "correct horse battery";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    Ok(Arc::new(database))
}

/// Test configuration with a random secret and low bcrypt cost
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            seed_exercises: false,
        },
        auth: AuthConfig {
            jwt_secret: generate_jwt_secret(),
            jwt_expiry_hours: 24,
            bcrypt_cost: TEST_BCRYPT_COST,
        },
        cors: CorsPolicy::AllowAny,
        uploads: UploadConfig {
            directory: upload_dir.to_path_buf(),
            max_bytes: 5 * 1024 * 1024,
        },
    }
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources(upload_dir: &Path) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    Ok(Arc::new(ServerResources::new(
        database,
        Arc::new(test_config(upload_dir)),
    )))
}

/// Full application router over the given resources
pub fn create_test_router(resources: &Arc<ServerResources>) -> axum::Router {
    LiftshareServer::new(Arc::clone(resources)).router()
}

/// Create a user with [`TEST_PASSWORD`]
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let new_user = NewUser {
        email: email.to_owned(),
        password: Some(TEST_PASSWORD.to_owned()),
        name: email.split('@').next().unwrap_or("user").to_owned(),
        google_id: None,
    };
    Ok(database.users().create(&new_user, TEST_BCRYPT_COST).await?)
}

/// Create a user and return them with a valid session token
pub async fn create_authenticated_user(
    resources: &ServerResources,
    email: &str,
) -> Result<(User, String)> {
    let user = create_test_user(&resources.database, email).await?;
    let token = resources.auth_manager.generate_token(&user)?;
    Ok((user, token))
}

/// Insert a custom exercise
pub async fn create_test_exercise(database: &Database, name: &str) -> Result<Exercise> {
    let request = CreateExerciseRequest {
        name: Some(name.to_owned()),
        muscle_group: Some("Legs".to_owned()),
        ..CreateExerciseRequest::default()
    };
    Ok(database.exercises().create(&request).await?)
}

/// `Authorization` header value for a token
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
