// ABOUTME: Axum integration for AppError (IntoResponse and extractor rejections)
// ABOUTME: Renders every error as a JSON body with a message and, for 5xx, the underlying error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use crate::constants::SERVER_ERROR;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-facing message
    pub message: String,
    /// Underlying failure, only present on server errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        if error.code.is_server_error() {
            Self {
                message: SERVER_ERROR.to_owned(),
                error: Some(error.message.clone()),
            }
        } else {
            Self {
                message: error.message.clone(),
                error: None,
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.code.is_server_error() {
            tracing::error!(
                code = ?self.code,
                source = ?self.source,
                "Request failed: {}",
                self.message
            );
        } else {
            tracing::debug!(code = ?self.code, status = status.as_u16(), "{}", self.message);
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Invalid path parameter: {}", rejection.body_text()),
        )
    }
}
