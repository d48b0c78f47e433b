// ABOUTME: Integration tests for bearer token authentication
// ABOUTME: Covers missing, malformed, forged, expired, and orphaned session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftshare_core::errors::ErrorCode;
use liftshare_server::auth::AuthManager;

#[tokio::test]
async fn test_valid_token_resolves_user() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let resources = common::create_test_resources(dir.path()).await?;
    let (user, token) = common::create_authenticated_user(&resources, "mara@example.com").await?;

    let auth = resources
        .auth_middleware
        .authenticate_request(Some(&common::bearer(&token)))
        .await?;

    assert_eq!(auth.user_id, user.id);
    assert_eq!(auth.user.email, "mara@example.com");
    assert_eq!(auth.user.id, user.id);

    let rendered = serde_json::to_value(&auth.user)?;
    assert!(rendered.get("password_hash").is_none());
    assert!(rendered.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_and_non_bearer_headers_require_auth() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let resources = common::create_test_resources(dir.path()).await?;

    let missing = resources
        .auth_middleware
        .authenticate_request(None)
        .await
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::AuthRequired);
    assert_eq!(missing.http_status(), 401);

    let basic = resources
        .auth_middleware
        .authenticate_request(Some("Basic dXNlcjpwYXNz"))
        .await
        .unwrap_err();
    assert_eq!(basic.code, ErrorCode::AuthRequired);
    Ok(())
}

#[tokio::test]
async fn test_forged_and_garbage_tokens_are_invalid() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let resources = common::create_test_resources(dir.path()).await?;
    let user = common::create_test_user(&resources.database, "ivo@example.com").await?;

    let forger = AuthManager::new(b"some-other-secret", 24);
    let forged = forger.generate_token(&user)?;
    let error = resources
        .auth_middleware
        .authenticate_request(Some(&common::bearer(&forged)))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthInvalid);

    let error = resources
        .auth_middleware
        .authenticate_request(Some("Bearer not.a.jwt"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthInvalid);
    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let resources = common::create_test_resources(dir.path()).await?;
    let user = common::create_test_user(&resources.database, "eli@example.com").await?;

    let expired = AuthManager::new(resources.config.auth.jwt_secret.as_bytes(), -1)
        .generate_token(&user)?;
    let error = resources
        .auth_middleware
        .authenticate_request(Some(&common::bearer(&expired)))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::AuthExpired);
    assert_eq!(error.http_status(), 401);
    Ok(())
}

#[tokio::test]
async fn test_token_for_deleted_user_is_invalid() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let resources = common::create_test_resources(dir.path()).await?;
    let (user, token) = common::create_authenticated_user(&resources, "gone@example.com").await?;

    assert!(resources.database.users().delete(user.id).await?);

    let error = resources
        .auth_middleware
        .authenticate_request(Some(&common::bearer(&token)))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthInvalid);
    Ok(())
}
