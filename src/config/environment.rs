// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, CORS policy, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::auth::generate_jwt_secret;
use anyhow::{Context, Result};
use liftshare_core::constants::{auth, ports, uploads};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:` or a bare file path.
    ///
    /// # Errors
    ///
    /// Returns an error for URLs naming a database engine other than `SQLite`
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(path_str) = trimmed.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                return Ok(Self::Memory);
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }
        if trimmed.contains("://") {
            anyhow::bail!("Unsupported database URL '{trimmed}': only sqlite is supported");
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./fitness_database.sqlite"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Cross-origin policy, decided once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin may call the API
    AllowAny,
    /// Only the listed origins (scheme://host[:port]) may call the API
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Parse `*` or a comma-separated origin list
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is not an absolute http(s) origin
    pub fn parse(value: &str) -> Result<Self> {
        let entries: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if entries.is_empty() || entries.contains(&"*") {
            return Ok(Self::AllowAny);
        }

        let origins = entries
            .into_iter()
            .map(|entry| {
                let url = url::Url::parse(entry)
                    .with_context(|| format!("Invalid CORS origin '{entry}'"))?;
                if !matches!(url.scheme(), "http" | "https") {
                    anyhow::bail!("CORS origin '{entry}' must use http or https");
                }
                Ok(url.origin().ascii_serialization())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::AllowList(origins))
    }
}

impl fmt::Display for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllowAny => write!(f, "*"),
            Self::AllowList(origins) => write!(f, "{}", origins.join(", ")),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Insert the built-in exercise catalog at startup
    pub seed_exercises: bool,
}

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Session token lifetime
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Image upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to and served from
    pub directory: PathBuf,
    /// Maximum accepted file size in bytes
    pub max_bytes: usize,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Cross-origin policy
    pub cors: CorsPolicy,
    /// Upload configuration
    pub uploads: UploadConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed, if `JWT_SECRET` is
    /// missing in production, or if validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                anyhow::bail!("JWT_SECRET must be set in production");
            }
            _ => {
                warn!(
                    "JWT_SECRET not set; using a random per-process secret (tokens will not survive restarts)"
                );
                generate_jwt_secret()
            }
        };

        let config = Self {
            host: env_var_or("HOST", ports::DEFAULT_HOST),
            http_port: parse_env("PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    &DatabaseUrl::default().to_connection_string(),
                ))?,
                seed_exercises: parse_env("SEED_EXERCISES", true)?,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", auth::DEFAULT_JWT_EXPIRY_HOURS)?,
                bcrypt_cost: parse_env("BCRYPT_COST", auth::DEFAULT_BCRYPT_COST)?,
            },
            cors: CorsPolicy::parse(&env_var_or("CORS_ALLOWED_ORIGINS", "*"))?,
            uploads: UploadConfig {
                directory: PathBuf::from(env_var_or("UPLOAD_DIR", uploads::DEFAULT_UPLOAD_DIR)),
                max_bytes: parse_env("MAX_UPLOAD_BYTES", uploads::DEFAULT_MAX_UPLOAD_BYTES)?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if !(auth::MIN_BCRYPT_COST..=auth::MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            anyhow::bail!(
                "BCRYPT_COST must be between {} and {}, got {}",
                auth::MIN_BCRYPT_COST,
                auth::MAX_BCRYPT_COST,
                self.auth.bcrypt_cost
            );
        }

        if self.auth.jwt_expiry_hours <= 0 {
            anyhow::bail!("JWT_EXPIRY_HOURS must be positive");
        }

        if self.auth.jwt_secret.is_empty() {
            anyhow::bail!("JWT secret cannot be empty");
        }

        if self.uploads.max_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }

        if self.environment.is_production() && self.cors == CorsPolicy::AllowAny {
            warn!("CORS allows any origin in production; set CORS_ALLOWED_ORIGINS");
        }

        if self.environment.is_production() && self.database.url.is_memory() {
            warn!("Production is running on an in-memory database; data will not persist");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Liftshare Server Configuration:\n\
             - Environment: {}\n\
             - Bind: {}:{}\n\
             - Database: {}\n\
             - Seed Exercises: {}\n\
             - Token Expiry: {}h\n\
             - bcrypt Cost: {}\n\
             - CORS: {}\n\
             - Upload Dir: {} (max {} bytes)",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.database.seed_exercises,
            self.auth.jwt_expiry_hours,
            self.auth.bcrypt_cost,
            self.cors,
            self.uploads.directory.display(),
            self.uploads.max_bytes,
        )
    }
}

/// Read an environment variable or fall back to a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
