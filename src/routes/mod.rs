// ABOUTME: Route module organization for the Liftshare HTTP API
// ABOUTME: One routes struct per domain plus the shared bearer authentication helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module exposes a `XRoutes::routes(resources)` constructor
//! returning a stateful `Router`. Handlers stay thin: authenticate, parse,
//! call a database manager, wrap the result in JSON.
//! Authentication runs before path and body parsing, so an anonymous
//! request is always answered with 401.

/// Registration, login, and session routes
pub mod auth;
/// Exercise catalog routes
pub mod exercises;
/// Health check route
pub mod health;
/// Profile settings routes
pub mod profile;
/// Image upload route
pub mod upload;
/// Workout CRUD and public sharing routes
pub mod workouts;

pub use auth::AuthRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use profile::ProfileRoutes;
pub use upload::UploadRoutes;
pub use workouts::WorkoutRoutes;

use crate::middleware::AuthResult;
use crate::resources::ServerResources;
use axum::http::{header, HeaderMap};
use liftshare_core::errors::AppError;
use std::sync::Arc;

/// Authenticate a request from its `Authorization` header
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    resources
        .auth_middleware
        .authenticate_request(auth_header)
        .await
}
