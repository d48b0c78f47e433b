// ABOUTME: Database operations for the shared exercise catalog
// ABOUTME: Lists, fetches, and creates exercises; user-created entries are flagged custom
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{now_timestamp, parse_timestamp};
use crate::models::Exercise;
use liftshare_core::errors::{AppError, AppResult};
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Exercise columns in select order
pub(crate) const EXERCISE_FIELDS: [&str; 14] = [
    "id",
    "name",
    "short_description",
    "detailed_description",
    "video_embed",
    "video_url",
    "image_url",
    "is_custom",
    "muscle_group",
    "difficulty",
    "equipment",
    "target_muscles",
    "created_at",
    "updated_at",
];

/// Select list for exercise columns of `alias`, each renamed with `prefix`
pub(crate) fn prefixed_exercise_columns(alias: &str, prefix: &str) -> String {
    EXERCISE_FIELDS
        .iter()
        .map(|field| format!("{alias}.{field} AS {prefix}{field}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Request body for creating an exercise
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateExerciseRequest {
    /// Display name (required)
    pub name: Option<String>,
    /// One-line description
    pub short_description: Option<String>,
    /// Long-form instructions
    pub detailed_description: Option<String>,
    /// Embeddable player markup
    pub video_embed: Option<String>,
    /// Demonstration video link, must be http(s)
    pub video_url: Option<String>,
    /// Illustration URL
    pub image_url: Option<String>,
    /// Primary muscle group
    pub muscle_group: Option<String>,
    /// Difficulty label
    pub difficulty: Option<String>,
    /// Required equipment
    pub equipment: Option<String>,
    /// Comma-separated target muscles
    pub target_muscles: Option<String>,
}

impl CreateExerciseRequest {
    /// Validate the request and return the trimmed name
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or a non-http(s) video URL
    pub fn validate(&self) -> AppResult<String> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::missing_field("Exercise name is required"))?;

        if let Some(video_url) = self.video_url.as_deref().filter(|u| !u.trim().is_empty()) {
            let is_http = url::Url::parse(video_url.trim())
                .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
            if !is_http {
                return Err(AppError::invalid_input("Video URL must be a valid http(s) URL"));
            }
        }

        Ok(name.to_owned())
    }
}

/// Exercise catalog operations manager
pub struct ExercisesManager {
    pool: SqlitePool,
}

impl ExercisesManager {
    /// Create a new exercises manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every exercise ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<Exercise>> {
        let columns = EXERCISE_FIELDS.join(", ");
        let rows = sqlx::query(&format!(
            "SELECT {columns} FROM exercises ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Get an exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, exercise_id: i64) -> AppResult<Option<Exercise>> {
        let columns = EXERCISE_FIELDS.join(", ");
        let row = sqlx::query(&format!("SELECT {columns} FROM exercises WHERE id = $1"))
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?;

        row.map(|r| row_to_exercise(&r)).transpose()
    }

    /// Create a user exercise (always custom)
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error
    pub async fn create(&self, request: &CreateExerciseRequest) -> AppResult<Exercise> {
        self.insert(request, true).await
    }

    /// Whether an exercise with this exact name exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM exercises WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Validate and insert an exercise row
    pub(crate) async fn insert(
        &self,
        request: &CreateExerciseRequest,
        is_custom: bool,
    ) -> AppResult<Exercise> {
        let name = request.validate()?;
        let now = now_timestamp();

        let result = sqlx::query(
            r"
            INSERT INTO exercises (
                name, short_description, detailed_description, video_embed, video_url,
                image_url, is_custom, muscle_group, difficulty, equipment, target_muscles,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            ",
        )
        .bind(&name)
        .bind(&request.short_description)
        .bind(&request.detailed_description)
        .bind(&request.video_embed)
        .bind(&request.video_url)
        .bind(&request.image_url)
        .bind(is_custom)
        .bind(&request.muscle_group)
        .bind(&request.difficulty)
        .bind(&request.equipment)
        .bind(&request.target_muscles)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercise: {e}")))?;

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Created exercise could not be read back"))
    }
}

/// Convert a database row to an `Exercise`
pub(crate) fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    row_to_exercise_prefixed(row, "")
}

/// Convert prefixed exercise columns (used by workout joins)
pub(crate) fn row_to_exercise_prefixed(row: &SqliteRow, prefix: &str) -> AppResult<Exercise> {
    let col = |name: &str| format!("{prefix}{name}");
    let created_at: String = row.try_get(col("created_at").as_str())?;
    let updated_at: String = row.try_get(col("updated_at").as_str())?;

    Ok(Exercise {
        id: row.try_get(col("id").as_str())?,
        name: row.try_get(col("name").as_str())?,
        short_description: row.try_get(col("short_description").as_str())?,
        detailed_description: row.try_get(col("detailed_description").as_str())?,
        video_embed: row.try_get(col("video_embed").as_str())?,
        video_url: row.try_get(col("video_url").as_str())?,
        image_url: row.try_get(col("image_url").as_str())?,
        is_custom: row.try_get(col("is_custom").as_str())?,
        muscle_group: row.try_get(col("muscle_group").as_str())?,
        difficulty: row.try_get(col("difficulty").as_str())?,
        equipment: row.try_get(col("equipment").as_str())?,
        target_muscles: row.try_get(col("target_muscles").as_str())?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
