// ABOUTME: HTTP integration tests for authentication routes
// ABOUTME: Exercises register, login, me, and change-password through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use liftshare_server::config::DatabaseUrl;
use liftshare_server::database::Database;
use liftshare_server::resources::ServerResources;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct AuthTestSetup {
    resources: Arc<ServerResources>,
    _upload_dir: tempfile::TempDir,
}

impl AuthTestSetup {
    async fn new() -> anyhow::Result<Self> {
        let upload_dir = tempfile::tempdir()?;
        let resources = common::create_test_resources(upload_dir.path()).await?;
        Ok(Self {
            resources,
            _upload_dir: upload_dir,
        })
    }

    fn router(&self) -> axum::Router {
        common::create_test_router(&self.resources)
    }

    async fn register(&self, email: &str, password: &str) -> Value {
        AxumTestRequest::post("/api/auth/register")
            .json(&json!({"email": email, "password": password, "name": "Tester"}))
            .send(self.router())
            .await
            .assert_status(StatusCode::CREATED)
            .json()
    }
}

#[tokio::test]
async fn test_register_returns_token_and_public_user() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;
    let body = setup.register("new@example.com", "hunter22").await;

    assert!(body["message"].is_string());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "new@example.com");
    assert_eq!(body["user"]["name"], "Tester");
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"]["created_at"].is_string());
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn test_register_validation() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;

    let cases = [
        json!({"email": "a@example.com", "password": "pw"}),
        json!({"email": "  ", "password": "pw", "name": "A"}),
        json!({"email": "not-an-email", "password": "pw", "name": "A"}),
        json!({"email": "a@example", "password": "pw", "name": "A"}),
    ];
    for body in cases {
        let response: Value = AxumTestRequest::post("/api/auth/register")
            .json(&body)
            .send(setup.router())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert!(response["message"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email_is_bad_request() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;
    setup.register("dupe@example.com", "first").await;

    let body: Value = AxumTestRequest::post("/api/auth/register")
        .json(&json!({"email": "dupe@example.com", "password": "second", "name": "B"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["message"], "User already exists with this email");
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;

    let body: Value = AxumTestRequest::post("/api/auth/login")
        .raw("application/json", b"{\"email\": ")
        .send(setup.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;
    setup.register("known@example.com", "right-password").await;

    let wrong_password = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "known@example.com", "password": "wrong"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .text();
    let unknown_email = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "wrong"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .text();

    assert_eq!(wrong_password, unknown_email);
    let body: Value = serde_json::from_str(&wrong_password)?;
    assert_eq!(body["message"], "Invalid email or password");
    Ok(())
}

#[tokio::test]
async fn test_login_without_stored_credential_fails_like_wrong_password() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;
    let new_user = liftshare_server::database::NewUser {
        email: "federated@example.com".to_owned(),
        password: None,
        name: "Fed".to_owned(),
        google_id: Some("sub-1".to_owned()),
    };
    setup
        .resources
        .database
        .users()
        .create(&new_user, common::TEST_BCRYPT_COST)
        .await?;

    let body: Value = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "federated@example.com", "password": "anything"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["message"], "Invalid email or password");
    Ok(())
}

/// Fastest of `rounds` login attempts
async fn fastest_login(router: &axum::Router, email: &str, rounds: usize) -> Duration {
    let mut fastest = Duration::MAX;
    for _ in 0..rounds {
        let started = Instant::now();
        AxumTestRequest::post("/api/auth/login")
            .json(&json!({"email": email, "password": "not-the-password"}))
            .send(router.clone())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        fastest = fastest.min(started.elapsed());
    }
    fastest
}

#[tokio::test]
async fn test_unknown_email_login_does_bcrypt_work() -> anyhow::Result<()> {
    const COST: u32 = 10;
    let upload_dir = tempfile::tempdir()?;
    let mut config = common::test_config(upload_dir.path());
    config.auth.bcrypt_cost = COST;
    let database = Database::new(&DatabaseUrl::Memory).await?;
    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    let router = common::create_test_router(&resources);

    AxumTestRequest::post("/api/auth/register")
        .json(&json!({"email": "real@example.com", "password": "pw-123456", "name": "Real"}))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let decoy = resources.decoy_password_hash().await?;
    assert!(decoy.starts_with(&format!("$2b${COST}$")));

    let known = fastest_login(&router, "real@example.com", 3).await;
    let unknown = fastest_login(&router, "ghost@example.com", 3).await;
    assert!(
        unknown * 3 >= known,
        "unknown email answered in {unknown:?}, known email in {known:?}"
    );
    Ok(())
}

#[tokio::test]
async fn test_login_missing_fields() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;

    AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "x@example.com"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_login_then_me() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;
    setup.register("me@example.com", "pa55word").await;

    let login: Value = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "me@example.com", "password": "pa55word"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let token = login["token"].as_str().unwrap();

    let me: Value = AxumTestRequest::get("/api/auth/me")
        .bearer(token)
        .send(setup.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["user"]["email"], "me@example.com");
    assert!(me["user"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn test_me_requires_valid_token() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;

    let missing: Value = AxumTestRequest::get("/api/auth/me")
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(missing["message"], "Access denied. No token provided.");

    AxumTestRequest::get("/api/auth/me")
        .bearer("definitely-not-a-token")
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_change_password_flow() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;
    let registered = setup.register("change@example.com", "old-secret").await;
    let token = registered["token"].as_str().unwrap();

    let wrong: Value = AxumTestRequest::put("/api/auth/change-password")
        .bearer(token)
        .json(&json!({"currentPassword": "nope", "newPassword": "new-secret"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(wrong["message"], "Current password is incorrect");

    AxumTestRequest::put("/api/auth/change-password")
        .bearer(token)
        .json(&json!({"currentPassword": "old-secret"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::put("/api/auth/change-password")
        .bearer(token)
        .json(&json!({"currentPassword": "old-secret", "newPassword": "new-secret"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "change@example.com", "password": "old-secret"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "change@example.com", "password": "new-secret"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_change_password_requires_auth() -> anyhow::Result<()> {
    let setup = AuthTestSetup::new().await?;

    AxumTestRequest::put("/api/auth/change-password")
        .json(&json!({"currentPassword": "a", "newPassword": "b"}))
        .send(setup.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}
