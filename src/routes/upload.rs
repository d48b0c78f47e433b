// ABOUTME: Route handler for authenticated image uploads
// ABOUTME: Accepts one multipart image, checks type and size, and stores it under a random name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image upload route
//!
//! Stored files are served back under `/uploads/<filename>`. Nothing
//! removes files that end up unreferenced.

use super::authenticate;
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use liftshare_core::constants::routes::UPLOADS;
use liftshare_core::constants::uploads::{ALLOWED_IMAGE_TYPES, IMAGE_FIELD};
use liftshare_core::errors::AppError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Extra request body allowance for multipart boundaries and headers
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Response for a stored upload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Human readable status
    pub message: String,
    /// Public path of the stored file
    pub image_url: String,
    /// Generated file name on disk
    pub filename: String,
    /// File name supplied by the client
    pub original_name: String,
    /// Stored size in bytes
    pub size: usize,
}

/// File extension for an accepted image content type
#[must_use]
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(allowed, _)| allowed.eq_ignore_ascii_case(content_type))
        .map(|(_, extension)| *extension)
}

/// Random stored file name: `image-<millis>-<random>.<ext>`
#[must_use]
pub fn generate_filename(extension: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!(
        "{IMAGE_FIELD}-{}-{suffix}.{extension}",
        Utc::now().timestamp_millis()
    )
}

/// Human readable size limit
fn describe_limit(max_bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if max_bytes % MIB == 0 {
        format!("{}MB", max_bytes / MIB)
    } else {
        format!("{max_bytes} bytes")
    }
}

/// Upload routes handler
pub struct UploadRoutes;

impl UploadRoutes {
    /// Create the upload route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let body_limit = resources
            .config
            .uploads
            .max_bytes
            .saturating_add(MULTIPART_OVERHEAD_BYTES);

        Router::new()
            .route("/api/upload", post(Self::handle_upload))
            .layer(DefaultBodyLimit::max(body_limit))
            .with_state(resources)
    }

    /// Handle POST /api/upload
    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let mut multipart = multipart.map_err(|_| AppError::invalid_input("No file uploaded"))?;
        let max_bytes = resources.config.uploads.max_bytes;

        let mut upload = None;
        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(e.body_text()))?
        {
            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }

            let content_type = field.content_type().unwrap_or_default().to_owned();
            let extension = image_extension(&content_type).ok_or_else(|| {
                AppError::invalid_input("Unsupported file type. Allowed: JPEG, PNG, WebP")
            })?;
            let original_name = field.file_name().unwrap_or_default().to_owned();

            let mut data = Vec::new();
            while let Some(chunk) = field
                .chunk()
                .await
                .map_err(|_| size_error(max_bytes))?
            {
                if data.len() + chunk.len() > max_bytes {
                    return Err(size_error(max_bytes));
                }
                data.extend_from_slice(&chunk);
            }

            upload = Some((content_type, extension, original_name, data));
            break;
        }

        let Some((content_type, extension, original_name, data)) = upload else {
            return Err(AppError::invalid_input("No file uploaded"));
        };

        let directory = &resources.config.uploads.directory;
        tokio::fs::create_dir_all(directory).await?;
        let filename = generate_filename(extension);
        tokio::fs::write(directory.join(&filename), &data).await?;

        AppLogger::log_upload(auth.user_id, &filename, data.len(), &content_type);

        let response = UploadResponse {
            message: "File uploaded successfully".to_owned(),
            image_url: format!("{UPLOADS}/{filename}"),
            filename,
            original_name,
            size: data.len(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

fn size_error(max_bytes: usize) -> AppError {
    AppError::invalid_input(format!("File size exceeds {}", describe_limit(max_bytes)))
}
