// ABOUTME: SQLite connection management, schema migration, and per-table managers
// ABOUTME: Owns the pool and hands out users, profiles, exercises, and workouts managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One `SQLite` file holds every table. The schema is created at startup with
//! `CREATE TABLE IF NOT EXISTS`; foreign keys are enforced on every connection
//! so deleting a user cascades to workouts, links, and the profile.

/// Exercise catalog operations
pub mod exercises;
/// Per-user profile operations
pub mod profiles;
/// Built-in exercise catalog
pub mod seed;
/// Account operations
pub mod users;
/// Workout ownership and fork workflow
pub mod workouts;

pub use exercises::{CreateExerciseRequest, ExercisesManager};
pub use profiles::{ProfileUpdate, ProfilesManager};
pub use users::{NewUser, UserUpdate, UsersManager};
pub use workouts::{
    CreateWorkoutRequest, ExerciseLinkRequest, UpdateWorkoutRequest, WorkoutsManager,
};

use crate::config::DatabaseUrl;
use chrono::{DateTime, SecondsFormat, Utc};
use liftshare_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations
    ///
    /// In-memory databases use a single connection that never expires so every
    /// query sees the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL '{url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Account operations
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Profile operations
    #[must_use]
    pub fn profiles(&self) -> ProfilesManager {
        ProfilesManager::new(self.pool.clone())
    }

    /// Exercise catalog operations
    #[must_use]
    pub fn exercises(&self) -> ExercisesManager {
        ExercisesManager::new(self.pool.clone())
    }

    /// Workout operations
    #[must_use]
    pub fn workouts(&self) -> WorkoutsManager {
        WorkoutsManager::new(self.pool.clone())
    }

    /// Round-trip query used by the health endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        debug!("Schema migrations applied");
        Ok(())
    }

    async fn execute_all(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(*statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }

    async fn migrate_users(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT,
                name TEXT NOT NULL,
                google_id TEXT UNIQUE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                height INTEGER CHECK (height IS NULL OR height BETWEEN 100 AND 250),
                weight REAL CHECK (weight IS NULL OR weight BETWEEN 30 AND 300),
                age INTEGER CHECK (age IS NULL OR age BETWEEN 10 AND 120),
                fitness_level TEXT NOT NULL DEFAULT 'beginner'
                    CHECK (fitness_level IN ('beginner', 'intermediate', 'advanced', 'professional')),
                avatar_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        ])
        .await
    }

    async fn migrate_exercises(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (length(name) > 0),
                short_description TEXT,
                detailed_description TEXT,
                video_embed TEXT,
                video_url TEXT,
                image_url TEXT,
                is_custom INTEGER NOT NULL DEFAULT 0,
                muscle_group TEXT,
                difficulty TEXT,
                equipment TEXT,
                target_muscles TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name)",
        ])
        .await
    }

    async fn migrate_workouts(&self) -> AppResult<()> {
        self.execute_all(&[
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 255),
                description TEXT,
                is_public INTEGER NOT NULL DEFAULT 0,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_from_workout_id INTEGER REFERENCES workouts(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
                sets INTEGER CHECK (sets BETWEEN 1 AND 20),
                reps TEXT,
                exercise_order INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id, created_at DESC)",
            "CREATE INDEX IF NOT EXISTS idx_workouts_public ON workouts(is_public, created_at DESC)",
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id, exercise_order)",
        ])
        .await
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime '{value}': {e}")))
}

/// Current time as fixed-width RFC 3339 text, so lexical order matches time order
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
