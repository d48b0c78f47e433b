// ABOUTME: Main library entry point for the Liftshare workout sharing API
// ABOUTME: Exposes configuration, persistence, authentication, and HTTP routing modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftshare Server
//!
//! A REST backend for building workouts from a shared exercise catalog,
//! publishing them, and saving other users' public workouts as private
//! copies.
//!
//! ## Architecture
//!
//! - **Config**: `ServerConfig` loaded once from the environment
//! - **Database**: `SQLite` managers for users, profiles, exercises, and workouts
//! - **Auth**: bcrypt credentials and HS256 session tokens
//! - **Routes**: axum routers, one per domain
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftshare_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Liftshare configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session tokens and password hashing
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// `SQLite` persistence layer
pub mod database;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and listener
pub mod server;

pub use liftshare_core::errors;
