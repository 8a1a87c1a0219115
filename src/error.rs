//! Error types for Vitrine.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth errors
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // File errors
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("File too large: max {max_size} bytes")]
    FileTooLarge { max_size: usize },

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 401
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,

            // 403
            Self::Forbidden | Self::InvalidCredentials => StatusCode::FORBIDDEN,

            // 404
            Self::NotFound(_) | Self::FileNotFound(_) => StatusCode::NOT_FOUND,

            // 409
            Self::AlreadyExists(_) => StatusCode::CONFLICT,

            // 400
            Self::Validation(_) | Self::InvalidInput(_) | Self::InvalidFileType(_) => {
                StatusCode::BAD_REQUEST
            }

            // 413
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,

            // 500
            Self::Database(_) | Self::Upload(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Upload(_) => "UPLOAD_FAILED",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::InvalidFileType(_) => "INVALID_FILE_TYPE",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Internal(format!("Password hashing error: {}", err))
    }
}
