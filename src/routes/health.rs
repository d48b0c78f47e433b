// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports service status together with a database round-trip check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    /// `connected` or `unreachable`
    pub database: String,
    /// RFC 3339 check time
    pub timestamp: String,
    /// Database error text when unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle GET /api/health
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let timestamp = chrono::Utc::now().to_rfc3339();

        match resources.database.ping().await {
            Ok(()) => {
                let response = HealthResponse {
                    status: "healthy".to_owned(),
                    database: "connected".to_owned(),
                    timestamp,
                    error: None,
                };
                (StatusCode::OK, Json(response)).into_response()
            }
            Err(e) => {
                tracing::error!("Health check database ping failed: {}", e);
                let response = HealthResponse {
                    status: "degraded".to_owned(),
                    database: "unreachable".to_owned(),
                    timestamp,
                    error: Some(e.message),
                };
                (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
            }
        }
    }
}
