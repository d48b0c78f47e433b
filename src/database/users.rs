// ABOUTME: Database operations for user accounts
// ABOUTME: Creates, reads, updates, and deletes users; hashes credentials exactly once on write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{now_timestamp, parse_timestamp};
use crate::auth::hash_password;
use crate::models::User;
use liftshare_core::constants::EMAIL_TAKEN;
use liftshare_core::errors::{AppError, AppResult, ErrorCode};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Fields for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email
    pub email: String,
    /// Plaintext password; `None` for externally authenticated accounts
    pub password: Option<String>,
    /// Display name
    pub name: String,
    /// External identity subject
    pub google_id: Option<String>,
}

/// Partial account update
///
/// `password` is the only path that writes the credential column. When it
/// is `Some`, the plaintext is hashed once and stored; when `None`, the
/// stored hash is left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name
    pub name: Option<String>,
    /// New login email
    pub email: Option<String>,
    /// New plaintext password
    pub password: Option<String>,
}

/// User database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user, hashing the password if one is supplied
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is taken, or a database error
    pub async fn create(&self, new_user: &NewUser, bcrypt_cost: u32) -> AppResult<User> {
        let password_hash = match &new_user.password {
            Some(plain) => Some(hash_password(plain, bcrypt_cost).await?),
            None => None,
        };
        let now = now_timestamp();

        let result = sqlx::query(
            r"
            INSERT INTO users (email, password_hash, name, google_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ",
        )
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(&new_user.name)
        .bind(&new_user.google_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            conflict if conflict.code == ErrorCode::ResourceAlreadyExists => {
                AppError::already_exists(EMAIL_TAKEN)
            }
            other => other,
        })?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Created user could not be read back"))
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, name, google_id, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, name, google_id, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Apply a partial update
    ///
    /// Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the new email is taken, or a database error
    pub async fn update(
        &self,
        user_id: i64,
        update: &UserUpdate,
        bcrypt_cost: u32,
    ) -> AppResult<Option<User>> {
        let Some(existing) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };

        let name = update.name.as_ref().unwrap_or(&existing.name);
        let email = update.email.as_ref().unwrap_or(&existing.email);
        let now = now_timestamp();

        match &update.password {
            Some(plain) => {
                let password_hash = hash_password(plain, bcrypt_cost).await?;
                sqlx::query(
                    r"
                    UPDATE users SET name = $1, email = $2, password_hash = $3, updated_at = $4
                    WHERE id = $5
                    ",
                )
                .bind(name)
                .bind(email)
                .bind(&password_hash)
                .bind(&now)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            }
            None => {
                sqlx::query(
                    r"
                    UPDATE users SET name = $1, email = $2, updated_at = $3
                    WHERE id = $4
                    ",
                )
                .bind(name)
                .bind(email)
                .bind(&now)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            }
        }

        self.get_by_id(user_id).await
    }

    /// Delete a user; workouts, links, and profile cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count registered users
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Convert a database row to a User struct
fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        google_id: row.try_get("google_id")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
