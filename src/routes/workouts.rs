// ABOUTME: Route handlers for workout CRUD and public workout sharing
// ABOUTME: Owner-scoped workout endpoints plus listing, viewing, and forking public workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout routes
//!
//! Owner-scoped endpoints answer 404 for workouts owned by someone else,
//! so a foreign id cannot be told apart from a missing one.

use super::authenticate;
use crate::database::{CreateWorkoutRequest, UpdateWorkoutRequest};
use crate::logging::AppLogger;
use crate::models::{Workout, WorkoutSummary};
use crate::resources::ServerResources;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use liftshare_core::constants::{PUBLIC_WORKOUT_NOT_FOUND, WORKOUT_NOT_FOUND};
use liftshare_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response carrying a list of workouts
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutListResponse {
    /// Human readable status
    pub message: String,
    /// Workouts, newest first
    pub workouts: Vec<Workout>,
}

/// Response carrying one workout
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutResponse {
    /// Human readable status
    pub message: String,
    /// The workout with its exercises
    pub workout: Workout,
}

/// Response for a saved public workout
#[derive(Debug, Serialize, Deserialize)]
pub struct ForkResponse {
    /// Human readable status
    pub message: String,
    /// The newly created private copy
    pub workout: WorkoutSummary,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Human readable status
    pub message: String,
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/workouts/public/list", get(Self::handle_list_public))
            .route("/api/workouts/public/:id", get(Self::handle_get_public))
            .route("/api/workouts/public/:id/save", post(Self::handle_fork))
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let workouts = resources.database.workouts().list_own(auth.user_id).await?;

        let response = WorkoutListResponse {
            message: "Workouts retrieved successfully".to_owned(),
            workouts,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/workouts
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CreateWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Json(body) = body?;

        let workout = resources
            .database
            .workouts()
            .create(auth.user_id, &body)
            .await?;
        tracing::info!(
            user.id = auth.user_id,
            workout.id = workout.id,
            workout.links = workout.exercises.len(),
            "Workout created"
        );

        let response = WorkoutResponse {
            message: "Workout created successfully".to_owned(),
            workout,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        workout_id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Path(workout_id) = workout_id?;

        let workout = resources
            .database
            .workouts()
            .get_own(auth.user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(WORKOUT_NOT_FOUND))?;

        let response = WorkoutResponse {
            message: "Workout retrieved successfully".to_owned(),
            workout,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/workouts/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        workout_id: Result<Path<i64>, PathRejection>,
        body: Result<Json<UpdateWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Path(workout_id) = workout_id?;
        let Json(body) = body?;

        let workout = resources
            .database
            .workouts()
            .update(auth.user_id, workout_id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(WORKOUT_NOT_FOUND))?;

        let response = WorkoutResponse {
            message: "Workout updated successfully".to_owned(),
            workout,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        workout_id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Path(workout_id) = workout_id?;

        let deleted = resources
            .database
            .workouts()
            .delete(auth.user_id, workout_id)
            .await?;
        if !deleted {
            return Err(AppError::not_found(WORKOUT_NOT_FOUND));
        }

        let response = DeleteResponse {
            message: "Workout deleted successfully".to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/public/list
    async fn handle_list_public(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;

        let workouts = resources.database.workouts().list_public().await?;

        let response = WorkoutListResponse {
            message: "Public workouts retrieved successfully".to_owned(),
            workouts,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/public/:id
    async fn handle_get_public(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        workout_id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;
        let Path(workout_id) = workout_id?;

        let workout = resources
            .database
            .workouts()
            .get_public(workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(PUBLIC_WORKOUT_NOT_FOUND))?;

        let response = WorkoutResponse {
            message: "Public workout retrieved successfully".to_owned(),
            workout,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/workouts/public/:id/save
    async fn handle_fork(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        workout_id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Path(workout_id) = workout_id?;

        let (summary, links) = resources
            .database
            .workouts()
            .fork_public(auth.user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(PUBLIC_WORKOUT_NOT_FOUND))?;

        AppLogger::log_workout_fork(auth.user_id, workout_id, summary.id, links);

        let response = ForkResponse {
            message: "Workout saved to your profile".to_owned(),
            workout: summary,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}
