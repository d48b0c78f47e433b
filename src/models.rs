// ABOUTME: Core data models for users, profiles, exercises, and workouts
// ABOUTME: Serializable domain types shared by the database managers and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Row-level types returned by the database managers. Ids are `SQLite`
//! integer primary keys; timestamps are stored as RFC 3339 text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registered account
///
/// `password_hash` is `None` for accounts created through an external
/// identity provider. It is never serialized.
#[derive(Debug, Clone)]
pub struct User {
    /// Primary key
    pub id: i64,
    /// Unique login email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: Option<String>,
    /// Display name
    pub name: String,
    /// External identity provider subject, unique when present
    pub google_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public representation with the credential stripped
    #[must_use]
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// User fields safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    /// Primary key
    pub id: i64,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    /// New to training
    #[default]
    Beginner,
    /// Regular training
    Intermediate,
    /// Experienced
    Advanced,
    /// Competes or coaches
    Professional,
}

impl FitnessLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Professional => "professional",
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "professional" => Ok(Self::Professional),
            other => Err(format!("Unknown fitness level: {other}")),
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user settings row, created lazily
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Primary key
    pub id: i64,
    /// Owning user (unique)
    pub user_id: i64,
    /// Height in centimetres
    pub height: Option<i64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Age in years
    pub age: Option<i64>,
    /// Training experience
    pub fitness_level: FitnessLevel,
    /// Avatar image URL, typically an `/uploads/...` path
    pub avatar_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry, either seeded or user-created (`is_custom`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    /// Primary key
    pub id: i64,
    /// Display name
    pub name: String,
    /// One-line description
    pub short_description: Option<String>,
    /// Long-form instructions
    pub detailed_description: Option<String>,
    /// Embeddable player markup
    pub video_embed: Option<String>,
    /// Link to a demonstration video
    pub video_url: Option<String>,
    /// Illustration URL
    pub image_url: Option<String>,
    /// Created by a user rather than seeded
    pub is_custom: bool,
    /// Primary muscle group
    pub muscle_group: Option<String>,
    /// Difficulty label
    pub difficulty: Option<String>,
    /// Required equipment
    pub equipment: Option<String>,
    /// Comma-separated target muscles
    pub target_muscles: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Link between a workout and an exercise with per-workout annotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutExercise {
    /// Primary key
    pub id: i64,
    /// Owning workout
    pub workout_id: i64,
    /// Linked exercise
    pub exercise_id: i64,
    /// Number of sets (1..=20), absent when the client gave none
    pub sets: Option<i64>,
    /// Free-text reps, e.g. "10" or "8-12"
    pub reps: Option<String>,
    /// Position within the workout
    #[serde(rename = "order")]
    pub exercise_order: i64,
    /// Free-text notes
    pub notes: Option<String>,
    /// Linked catalog entry
    pub exercise: Exercise,
}

/// Owner fields attached to public workout listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutOwner {
    /// Owner id
    pub id: i64,
    /// Owner display name
    pub name: String,
    /// Owner email
    pub email: String,
}

/// Workout with its ordered exercise links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Primary key
    pub id: i64,
    /// Display name (1-255 characters)
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Visible to every user and forkable
    pub is_public: bool,
    /// Owning user
    pub user_id: i64,
    /// Source workout this one was forked from
    pub created_from_workout_id: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Exercise links ordered by `order`
    pub exercises: Vec<WorkoutExercise>,
    /// Owner, populated for public listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<WorkoutOwner>,
}

/// Minimal view of a newly forked workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutSummary {
    /// Primary key
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
}
