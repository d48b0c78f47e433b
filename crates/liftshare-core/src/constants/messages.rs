// ABOUTME: Fixed client-facing messages returned by the Liftshare API
// ABOUTME: Shared so handlers and tests agree on exact wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Login failure message, identical for unknown email and wrong password
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Missing or unusable bearer token
pub const AUTH_REQUIRED: &str = "Access denied. No token provided.";
/// Token failed verification
pub const INVALID_TOKEN: &str = "Invalid token.";
/// Token expired
pub const TOKEN_EXPIRED: &str = "Token expired.";
/// Duplicate email at registration
pub const EMAIL_TAKEN: &str = "User already exists with this email";
/// Workout lookup failed under the ownership filter
pub const WORKOUT_NOT_FOUND: &str = "Workout not found";
/// Public workout lookup failed
pub const PUBLIC_WORKOUT_NOT_FOUND: &str = "Public workout not found";
/// Exercise lookup failed
pub const EXERCISE_NOT_FOUND: &str = "Exercise not found";
/// Current password did not verify
pub const CURRENT_PASSWORD_INCORRECT: &str = "Current password is incorrect";
/// Catch-all for unmatched routes
pub const ROUTE_NOT_FOUND: &str = "Route not found";
/// Generic server failure
pub const SERVER_ERROR: &str = "Server error";
