// ABOUTME: Database operations for workouts, their exercise links, and public forking
// ABOUTME: Owner-scoped CRUD plus public listing and transactional copy into another account
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout ownership and copy workflow
//!
//! Every owner-scoped query filters on `user_id`, so a workout owned by
//! someone else looks exactly like a missing one. Multi-statement writes
//! (create with links, replace-all update, fork) run in one transaction.

use super::exercises::{prefixed_exercise_columns, row_to_exercise_prefixed};
use super::{now_timestamp, parse_timestamp};
use crate::models::{Workout, WorkoutExercise, WorkoutOwner, WorkoutSummary};
use liftshare_core::constants::limits::{FORK_NAME_SUFFIX, MAX_SETS, MIN_SETS, WORKOUT_NAME_MAX_CHARS};
use liftshare_core::errors::{AppError, AppResult};
use serde::{Deserialize, Deserializer};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use std::collections::{BTreeSet, HashMap};

/// One exercise entry in a create or update request
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseLinkRequest {
    /// Catalog exercise to link
    pub exercise_id: i64,
    /// Number of sets (1..=20)
    #[serde(default)]
    pub sets: Option<i64>,
    /// Reps as free text; numeric JSON values are accepted
    #[serde(default, deserialize_with = "deserialize_reps")]
    pub reps: Option<String>,
    /// Position within the workout
    #[serde(default)]
    pub order: Option<i64>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for creating a workout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Display name (required, 1-255 characters)
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Publish immediately
    pub is_public: Option<bool>,
    /// Exercises to link
    pub exercises: Option<Vec<ExerciseLinkRequest>>,
}

/// Request body for updating a workout; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkoutRequest {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New visibility
    pub is_public: Option<bool>,
    /// Replacement exercise list; replaces every existing link when present
    pub exercises: Option<Vec<ExerciseLinkRequest>>,
}

/// How a link's `order` is filled when the request omits it
#[derive(Debug, Clone, Copy)]
enum OrderFallback {
    /// Use the entry's index in the request array
    Index,
    /// Use the column default (0)
    Zero,
}

/// Row filter for workout queries
#[derive(Debug, Clone, Copy)]
enum Scope {
    Owner(i64),
    OwnerWorkout { user_id: i64, workout_id: i64 },
    Public,
    PublicWorkout(i64),
}

impl Scope {
    const fn where_clause(self) -> &'static str {
        match self {
            Self::Owner(_) => "w.user_id = $1",
            Self::OwnerWorkout { .. } => "w.user_id = $1 AND w.id = $2",
            Self::Public => "w.is_public = 1",
            Self::PublicWorkout(_) => "w.is_public = 1 AND w.id = $1",
        }
    }

    const fn includes_owner(self) -> bool {
        matches!(self, Self::Public | Self::PublicWorkout(_))
    }
}

/// Validate and trim a workout name
///
/// # Errors
///
/// Returns a validation error when the name is blank or longer than 255 characters
pub fn validate_workout_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field("Workout name is required"));
    }
    if trimmed.chars().count() > WORKOUT_NAME_MAX_CHARS {
        return Err(AppError::out_of_range(format!(
            "Workout name must be at most {WORKOUT_NAME_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

fn validate_links(links: &[ExerciseLinkRequest]) -> AppResult<()> {
    for link in links {
        if let Some(sets) = link.sets {
            if !(MIN_SETS..=MAX_SETS).contains(&sets) {
                return Err(AppError::out_of_range(format!(
                    "Sets must be between {MIN_SETS} and {MAX_SETS}"
                )));
            }
        }
    }
    Ok(())
}

/// Workout database operations manager
pub struct WorkoutsManager {
    pool: SqlitePool,
}

impl WorkoutsManager {
    /// Create a new workouts manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's workouts with links, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_own(&self, user_id: i64) -> AppResult<Vec<Workout>> {
        self.fetch(Scope::Owner(user_id)).await
    }

    /// Get one of the user's workouts; `None` if missing or owned by someone else
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_own(&self, user_id: i64, workout_id: i64) -> AppResult<Option<Workout>> {
        Ok(self
            .fetch(Scope::OwnerWorkout {
                user_id,
                workout_id,
            })
            .await?
            .into_iter()
            .next())
    }

    /// Create a workout with its links in one transaction
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name, sets outside 1..=20, or an
    /// unknown exercise id; otherwise a database error
    pub async fn create(&self, user_id: i64, request: &CreateWorkoutRequest) -> AppResult<Workout> {
        let name = validate_workout_name(request.name.as_deref().unwrap_or_default())?;
        let links = request.exercises.as_deref().unwrap_or_default();
        validate_links(links)?;

        let now = now_timestamp();
        let mut tx = self.pool.begin().await?;
        ensure_exercises_exist(&mut tx, links).await?;

        let result = sqlx::query(
            r"
            INSERT INTO workouts (name, description, is_public, user_id, created_from_workout_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL, $5, $5)
            ",
        )
        .bind(&name)
        .bind(&request.description)
        .bind(request.is_public.unwrap_or(false))
        .bind(user_id)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        let workout_id = result.last_insert_rowid();
        insert_links(&mut tx, workout_id, links, OrderFallback::Index, &now).await?;
        tx.commit().await?;

        tracing::debug!(user.id = user_id, workout.id = workout_id, links = links.len(), "Workout created");

        self.get_own(user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::internal("Created workout could not be read back"))
    }

    /// Apply a partial update, replacing every link when `exercises` is present
    ///
    /// Returns `None` when the workout is missing or owned by someone else.
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error; nothing is written on error
    pub async fn update(
        &self,
        user_id: i64,
        workout_id: i64,
        request: &UpdateWorkoutRequest,
    ) -> AppResult<Option<Workout>> {
        let name = request
            .name
            .as_deref()
            .map(validate_workout_name)
            .transpose()?;
        if let Some(links) = &request.exercises {
            validate_links(links)?;
        }

        let now = now_timestamp();
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query(
            "SELECT name, description, is_public FROM workouts WHERE id = $1 AND user_id = $2",
        )
        .bind(workout_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let name = match name {
            Some(name) => name,
            None => existing.try_get("name")?,
        };
        let description: Option<String> = match &request.description {
            Some(description) => Some(description.clone()),
            None => existing.try_get("description")?,
        };
        let is_public = match request.is_public {
            Some(is_public) => is_public,
            None => existing.try_get("is_public")?,
        };

        sqlx::query(
            r"
            UPDATE workouts SET name = $1, description = $2, is_public = $3, updated_at = $4
            WHERE id = $5 AND user_id = $6
            ",
        )
        .bind(&name)
        .bind(&description)
        .bind(is_public)
        .bind(&now)
        .bind(workout_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        if let Some(links) = &request.exercises {
            ensure_exercises_exist(&mut tx, links).await?;
            sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
                .bind(workout_id)
                .execute(&mut *tx)
                .await?;
            insert_links(&mut tx, workout_id, links, OrderFallback::Zero, &now).await?;
        }

        tx.commit().await?;
        self.get_own(user_id, workout_id).await
    }

    /// Delete one of the user's workouts; links cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, user_id: i64, workout_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// List every public workout with owner and links, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_public(&self) -> AppResult<Vec<Workout>> {
        self.fetch(Scope::Public).await
    }

    /// Get a public workout; `None` if missing or private
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_public(&self, workout_id: i64) -> AppResult<Option<Workout>> {
        Ok(self
            .fetch(Scope::PublicWorkout(workout_id))
            .await?
            .into_iter()
            .next())
    }

    /// Copy a public workout into `user_id`'s account
    ///
    /// The copy is private, named `<name> (copy)`, records the source in
    /// `created_from_workout_id`, and duplicates every link. Returns `None`
    /// if the source is missing or private.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails; nothing is written on error
    pub async fn fork_public(
        &self,
        user_id: i64,
        workout_id: i64,
    ) -> AppResult<Option<(WorkoutSummary, u64)>> {
        let mut tx = self.pool.begin().await?;

        let source = sqlx::query(
            "SELECT name, description FROM workouts WHERE id = $1 AND is_public = 1",
        )
        .bind(workout_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(source) = source else {
            return Ok(None);
        };

        let source_name: String = source.try_get("name")?;
        let description: Option<String> = source.try_get("description")?;
        let name = format!("{source_name}{FORK_NAME_SUFFIX}");
        let now = now_timestamp();

        let result = sqlx::query(
            r"
            INSERT INTO workouts (name, description, is_public, user_id, created_from_workout_id, created_at, updated_at)
            VALUES ($1, $2, 0, $3, $4, $5, $5)
            ",
        )
        .bind(&name)
        .bind(&description)
        .bind(user_id)
        .bind(workout_id)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to fork workout: {e}")))?;
        let new_id = result.last_insert_rowid();

        let copied = sqlx::query(
            r"
            INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, exercise_order, notes, created_at, updated_at)
            SELECT $1, exercise_id, sets, reps, exercise_order, notes, $2, $2
            FROM workout_exercises
            WHERE workout_id = $3
            ORDER BY exercise_order ASC, id ASC
            ",
        )
        .bind(new_id)
        .bind(&now)
        .bind(workout_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to copy workout exercises: {e}")))?
        .rows_affected();

        tx.commit().await?;

        Ok(Some((
            WorkoutSummary {
                id: new_id,
                name,
                description,
            },
            copied,
        )))
    }

    /// Count every workout and the public subset
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn counts(&self) -> AppResult<(i64, i64)> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total, COALESCE(SUM(is_public), 0) AS public FROM workouts",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok((row.try_get("total")?, row.try_get("public")?))
    }

    async fn fetch(&self, scope: Scope) -> AppResult<Vec<Workout>> {
        let sql = format!(
            r"
            SELECT w.id, w.name, w.description, w.is_public, w.user_id, w.created_from_workout_id,
                   w.created_at, w.updated_at, u.name AS owner_name, u.email AS owner_email
            FROM workouts w
            JOIN users u ON u.id = w.user_id
            WHERE {}
            ORDER BY w.created_at DESC, w.id DESC
            ",
            scope.where_clause()
        );

        let query = sqlx::query(&sql);
        let query = match scope {
            Scope::Owner(user_id) => query.bind(user_id),
            Scope::OwnerWorkout {
                user_id,
                workout_id,
            } => query.bind(user_id).bind(workout_id),
            Scope::Public => query,
            Scope::PublicWorkout(workout_id) => query.bind(workout_id),
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workouts: {e}")))?;

        let ids: Vec<i64> = rows
            .iter()
            .map(|row| row.try_get("id"))
            .collect::<Result<_, _>>()?;
        let mut links = self.load_links(&ids).await?;

        rows.iter()
            .map(|row| {
                let mut workout = row_to_workout(row, scope.includes_owner())?;
                workout.exercises = links.remove(&workout.id).unwrap_or_default();
                Ok(workout)
            })
            .collect()
    }

    async fn load_links(&self, workout_ids: &[i64]) -> AppResult<HashMap<i64, Vec<WorkoutExercise>>> {
        if workout_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = (1..=workout_ids.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            r"
            SELECT we.id AS link_id, we.workout_id, we.exercise_id, we.sets, we.reps,
                   we.exercise_order, we.notes, {}
            FROM workout_exercises we
            JOIN exercises e ON e.id = we.exercise_id
            WHERE we.workout_id IN ({placeholders})
            ORDER BY we.workout_id, we.exercise_order ASC, we.id ASC
            ",
            prefixed_exercise_columns("e", "e_")
        );

        let rows = workout_ids
            .iter()
            .fold(sqlx::query(&sql), |query, id| query.bind(*id))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout exercises: {e}")))?;

        let mut grouped: HashMap<i64, Vec<WorkoutExercise>> = HashMap::new();
        for row in &rows {
            let link = row_to_link(row)?;
            grouped.entry(link.workout_id).or_default().push(link);
        }
        Ok(grouped)
    }
}

async fn ensure_exercises_exist(
    tx: &mut Transaction<'_, Sqlite>,
    links: &[ExerciseLinkRequest],
) -> AppResult<()> {
    let ids: BTreeSet<i64> = links.iter().map(|link| link.exercise_id).collect();
    for exercise_id in ids {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM exercises WHERE id = $1")
            .bind(exercise_id)
            .fetch_optional(&mut **tx)
            .await?;
        if found.is_none() {
            return Err(AppError::invalid_input(format!(
                "Exercise {exercise_id} does not exist"
            )));
        }
    }
    Ok(())
}

async fn insert_links(
    tx: &mut Transaction<'_, Sqlite>,
    workout_id: i64,
    links: &[ExerciseLinkRequest],
    fallback: OrderFallback,
    now: &str,
) -> AppResult<()> {
    for (index, link) in links.iter().enumerate() {
        let order = link.order.unwrap_or(match fallback {
            OrderFallback::Index => i64::try_from(index).unwrap_or(i64::MAX),
            OrderFallback::Zero => 0,
        });

        sqlx::query(
            r"
            INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, exercise_order, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ",
        )
        .bind(workout_id)
        .bind(link.exercise_id)
        .bind(link.sets)
        .bind(link.reps.as_deref())
        .bind(order)
        .bind(&link.notes)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to link exercise: {e}")))?;
    }
    Ok(())
}

fn row_to_workout(row: &SqliteRow, include_owner: bool) -> AppResult<Workout> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    let user_id: i64 = row.try_get("user_id")?;

    let owner = if include_owner {
        Some(WorkoutOwner {
            id: user_id,
            name: row.try_get("owner_name")?,
            email: row.try_get("owner_email")?,
        })
    } else {
        None
    };

    Ok(Workout {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        is_public: row.try_get("is_public")?,
        user_id,
        created_from_workout_id: row.try_get("created_from_workout_id")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
        exercises: Vec::new(),
        owner,
    })
}

fn row_to_link(row: &SqliteRow) -> AppResult<WorkoutExercise> {
    Ok(WorkoutExercise {
        id: row.try_get("link_id")?,
        workout_id: row.try_get("workout_id")?,
        exercise_id: row.try_get("exercise_id")?,
        sets: row.try_get("sets")?,
        reps: row.try_get("reps")?,
        exercise_order: row.try_get("exercise_order")?,
        notes: row.try_get("notes")?,
        exercise: row_to_exercise_prefixed(row, "e_")?,
    })
}

/// Accept reps as either a JSON string or a JSON number
fn deserialize_reps<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reps {
        Text(String),
        Count(i64),
    }

    Ok(Option::<Reps>::deserialize(deserializer)?.map(|reps| match reps {
        Reps::Text(text) => text,
        Reps::Count(count) => count.to_string(),
    }))
}
