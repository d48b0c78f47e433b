// ABOUTME: CORS middleware configuration for the HTTP API
// ABOUTME: Translates the configured CorsPolicy into a tower-http CorsLayer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::CorsPolicy;
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for a policy
///
/// `AllowAny` mirrors the development setup where the frontend runs on a
/// different port. `AllowList` only echoes origins that were validated at
/// startup.
pub fn setup_cors(policy: &CorsPolicy) -> CorsLayer {
    let allow_origin = match policy {
        CorsPolicy::AllowAny => AllowOrigin::any(),
        CorsPolicy::AllowList(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .expose_headers([header::HeaderName::from_static("x-request-id")])
}
