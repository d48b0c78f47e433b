// ABOUTME: Core types and constants for the Liftshare workout API
// ABOUTME: Foundation crate with error handling and domain limits shared by the server and tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftshare Core
//!
//! Foundation crate providing shared types and constants for the Liftshare
//! workout server. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP rendering
//! - **constants**: Validation limits, defaults, and user-facing messages

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
