// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Validation ranges, defaults, and fixed client-facing messages for Liftshare
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large list.

/// User-facing error and status messages
pub mod messages;

pub use messages::*;

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
}

/// API routes
pub mod routes {
    /// Public URL prefix for uploaded files
    pub const UPLOADS: &str = "/uploads";
}

/// Authentication defaults
pub mod auth {
    /// Session token lifetime in hours
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Default bcrypt work factor
    pub const DEFAULT_BCRYPT_COST: u32 = 12;
    /// Lowest bcrypt cost accepted by configuration
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt cost accepted by configuration
    pub const MAX_BCRYPT_COST: u32 = 31;
    /// Length in bytes of a generated development JWT secret
    pub const GENERATED_SECRET_BYTES: usize = 64;
}

/// Validation limits for workouts and links
pub mod limits {
    /// Maximum workout name length in characters
    pub const WORKOUT_NAME_MAX_CHARS: usize = 255;
    /// Minimum sets per workout exercise
    pub const MIN_SETS: i64 = 1;
    /// Maximum sets per workout exercise
    pub const MAX_SETS: i64 = 20;
    /// Suffix appended to forked workout names
    pub const FORK_NAME_SUFFIX: &str = " (copy)";
}

/// Profile ranges
pub mod profile {
    /// Minimum height in centimetres
    pub const MIN_HEIGHT_CM: i64 = 100;
    /// Maximum height in centimetres
    pub const MAX_HEIGHT_CM: i64 = 250;
    /// Minimum weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 30.0;
    /// Maximum weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 300.0;
    /// Minimum age in years
    pub const MIN_AGE: i64 = 10;
    /// Maximum age in years
    pub const MAX_AGE: i64 = 120;
}

/// Upload limits
pub mod uploads {
    /// Default maximum upload size (5 MiB)
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
    /// Multipart field carrying the image
    pub const IMAGE_FIELD: &str = "image";
    /// Default upload directory
    pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
    /// Accepted image content types with the extension stored on disk
    pub const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
        ("image/jpeg", "jpg"),
        ("image/jpg", "jpg"),
        ("image/png", "png"),
        ("image/webp", "webp"),
    ];
}
