// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{Notice, WorkoutType};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid numeric input for: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Cannot change workout type from {existing} to {requested} during edit")]
    TypeMismatch {
        existing: WorkoutType,
        requested: WorkoutType,
    },

    #[error("Insert failed: {0}")]
    Insert(String),

    #[error("Update failed: {0}")]
    Update(String),

    #[error("A save for {0} is already in progress")]
    SaveInFlight(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Field names rejected by validation, empty for every other error.
    pub fn invalid_fields(&self) -> &[&'static str] {
        match self {
            AppError::Validation(fields) => fields,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("JSON error: {}", err))
    }
}

/// Shown when an internal failure must not leak details.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    notice: Notice,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error, details) = match &self {
            AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", Some(message))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::TypeMismatch { .. } => {
                (StatusCode::CONFLICT, "type_mismatch", Some(message))
            }
            AppError::Insert(_) => (StatusCode::CONFLICT, "insert_failed", Some(message)),
            AppError::Update(_) => (StatusCode::CONFLICT, "update_failed", Some(message)),
            AppError::SaveInFlight(_) => (StatusCode::CONFLICT, "save_in_flight", Some(message)),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Template(err) => {
                tracing::error!(error = %err, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "template_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let notice = Notice::error(details.as_deref().unwrap_or(GENERIC_FAILURE));
        let body = ErrorResponse {
            error: error.to_string(),
            details,
            notice,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
