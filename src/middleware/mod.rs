// ABOUTME: HTTP middleware for authentication, CORS, and request tracing
// ABOUTME: Re-exports the pieces the router assembly wires together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer token authentication
pub mod auth;
/// Cross-origin resource sharing layer
pub mod cors;
/// Request id generation and propagation
pub mod request_id;
/// HTTP request spans
pub mod tracing;

pub use auth::{AuthMiddleware, AuthResult};
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use tracing::trace_layer;
