// ABOUTME: Route handlers for the current user's profile settings
// ABOUTME: Reads the profile (creating it on first access) and applies partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::authenticate;
use crate::database::ProfileUpdate;
use crate::models::UserProfile;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use liftshare_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response carrying the profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Human readable status
    pub message: String,
    /// The user's profile
    pub profile: UserProfile,
}

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get).put(Self::handle_update),
            )
            .with_state(resources)
    }

    /// Handle GET /api/profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let profile = resources
            .database
            .profiles()
            .get_or_create(auth.user_id)
            .await?;

        let response = ProfileResponse {
            message: "Profile retrieved successfully".to_owned(),
            profile,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/profile
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<ProfileUpdate>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Json(body) = body?;

        let profile = resources
            .database
            .profiles()
            .update(auth.user_id, &body)
            .await?;

        let response = ProfileResponse {
            message: "Profile updated successfully".to_owned(),
            profile,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
