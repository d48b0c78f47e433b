// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its typed parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Liftshare server
//!
//! All settings are read from the process environment once at startup,
//! validated, and then shared read-only through `ServerResources`.

/// Environment-based server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CorsPolicy, DatabaseConfig, DatabaseUrl, Environment, ServerConfig, UploadConfig,
};
