// ABOUTME: Route handlers for the shared exercise catalog
// ABOUTME: Lists, fetches, and creates exercises for authenticated users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::authenticate;
use crate::database::CreateExerciseRequest;
use crate::models::Exercise;
use crate::resources::ServerResources;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use liftshare_core::constants::EXERCISE_NOT_FOUND;
use liftshare_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response carrying the whole catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseListResponse {
    /// Human readable status
    pub message: String,
    /// Exercises ordered by name
    pub exercises: Vec<Exercise>,
}

/// Response carrying one exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseResponse {
    /// Human readable status
    pub message: String,
    /// The exercise
    pub exercise: Exercise,
}

/// Exercise routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/exercises",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/exercises/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;

        let exercises = resources.database.exercises().list().await?;

        let response = ExerciseListResponse {
            message: "Exercises retrieved successfully".to_owned(),
            exercises,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/exercises
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CreateExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Json(body) = body?;

        let exercise = resources.database.exercises().create(&body).await?;
        tracing::info!(
            user.id = auth.user_id,
            exercise.id = exercise.id,
            "Custom exercise created"
        );

        let response = ExerciseResponse {
            message: "Exercise created successfully".to_owned(),
            exercise,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/exercises/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        exercise_id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;
        let Path(exercise_id) = exercise_id?;

        let exercise = resources
            .database
            .exercises()
            .get(exercise_id)
            .await?
            .ok_or_else(|| AppError::not_found(EXERCISE_NOT_FOUND))?;

        let response = ExerciseResponse {
            message: "Exercise retrieved successfully".to_owned(),
            exercise,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
