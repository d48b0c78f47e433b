// ABOUTME: Conversion from sqlx errors into AppError
// ABOUTME: Unique-constraint violations become conflicts, everything else a database failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppError;

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        let unique_violation =
            matches!(&error, sqlx::Error::Database(db) if db.is_unique_violation());

        if unique_violation {
            return Self::already_exists("Resource already exists").with_source(error);
        }
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::not_found("Record not found");
        }
        Self::database(error.to_string()).with_source(error)
    }
}
