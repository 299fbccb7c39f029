//! Error handling for the Stockscan server
//!
//! Every failure reaches the scanner UI as `{"success": false, "message": ...}`
//! plus a machine-readable code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::LedgerError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock for {barcode}: {available} available, {requested} requested")]
    InsufficientStock {
        barcode: String,
        available: i32,
        requested: i32,
    },

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { barcode } => AppError::NotFound(format!("Product {}", barcode)),
            LedgerError::DuplicateKey { barcode } => AppError::DuplicateEntry(barcode),
            LedgerError::InvalidInput { field, message } => AppError::Validation { field, message },
            LedgerError::InsufficientStock {
                barcode,
                available,
                requested,
            } => AppError::InsufficientStock {
                barcode,
                available,
                requested,
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            field: "body".to_string(),
            message: rejection.body_text(),
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status, error code, user-facing message and offending field
    fn parts(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message.clone(),
                Some(field.clone()),
            ),
            AppError::DuplicateEntry(barcode) => (
                StatusCode::CONFLICT,
                "DUPLICATE_ENTRY",
                format!("Product {} already exists", barcode),
                Some("barcode".to_string()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", resource),
                None,
            ),
            AppError::InsufficientStock {
                available,
                requested,
                ..
            } => (
                StatusCode::BAD_REQUEST,
                "INSUFFICIENT_STOCK",
                format!(
                    "Insufficient stock: {} available, {} requested",
                    available, requested
                ),
                Some("quantity".to_string()),
            ),
            AppError::DatabaseError(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
                None,
            ),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = self.parts();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!(code, %message, "Request rejected");
        }

        let body = ErrorResponse {
            success: false,
            message,
            error: ErrorDetail {
                code: code.to_string(),
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
