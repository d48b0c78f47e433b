// ABOUTME: HTTP server assembly for the Liftshare API
// ABOUTME: Merges domain routers, applies middleware layers, and runs the listener with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! Layer order from outermost: request id, tracing, CORS. The request id
//! layer runs first so the trace span can record it.

use crate::middleware::{request_id_middleware, setup_cors, trace_layer};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, ExerciseRoutes, HealthRoutes, ProfileRoutes, UploadRoutes, WorkoutRoutes,
};
use anyhow::{Context, Result};
use axum::{
    http::{Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use liftshare_core::constants::{routes::UPLOADS, ROUTE_NOT_FOUND};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

/// Body of the catch-all 404 response
#[derive(Debug, Serialize, Deserialize)]
pub struct NotFoundResponse {
    /// Human readable status
    pub message: String,
    /// Requested path
    pub path: String,
    /// Requested method
    pub method: String,
}

/// Liftshare HTTP server
pub struct LiftshareServer {
    resources: Arc<ServerResources>,
}

impl LiftshareServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Shared resources
    #[must_use]
    pub const fn resources(&self) -> &Arc<ServerResources> {
        &self.resources
    }

    /// Build the complete application router
    pub fn router(&self) -> Router {
        let resources = &self.resources;
        let uploads = ServeDir::new(&resources.config.uploads.directory);

        Router::new()
            .merge(AuthRoutes::routes(Arc::clone(resources)))
            .merge(ExerciseRoutes::routes(Arc::clone(resources)))
            .merge(WorkoutRoutes::routes(Arc::clone(resources)))
            .merge(ProfileRoutes::routes(Arc::clone(resources)))
            .merge(UploadRoutes::routes(Arc::clone(resources)))
            .merge(HealthRoutes::routes(Arc::clone(resources)))
            .nest_service(UPLOADS, uploads)
            .fallback(handle_not_found)
            .layer(setup_cors(&resources.config.cors))
            .layer(trace_layer())
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    pub async fn run(&self) -> Result<()> {
        let config = &self.resources.config;
        let address = format!("{}:{}", config.host, config.http_port);
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        info!("Liftshare API listening on http://{}", address);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated with an error")?;

        info!("Liftshare API stopped");
        Ok(())
    }
}

/// JSON 404 for unmatched routes
async fn handle_not_found(method: Method, uri: Uri) -> Response {
    let response = NotFoundResponse {
        message: ROUTE_NOT_FOUND.to_owned(),
        path: uri.path().to_owned(),
        method: method.to_string(),
    };
    (StatusCode::NOT_FOUND, Json(response)).into_response()
}

/// Resolve when the process is asked to stop
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
