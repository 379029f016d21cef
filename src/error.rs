//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Every failure raised anywhere in the request path propagates
//! unchanged up to this single normalization boundary: the
//! `actix_web::error::ResponseError` impl, which maps each error kind to its
//! fixed HTTP status and the `{"error": ..., "details"?: ...}` JSON envelope.
//!
//! `From` implementations are provided for `sqlx::Error`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` so the `?`
//! operator can be used at call sites. Internal and database failures are
//! logged server-side and rendered as a generic message; their detail never
//! reaches the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
///
/// Each variant carries its own fixed status code, switched on by the
/// `ResponseError` impl below.
#[derive(Debug)]
pub enum AppError {
    /// Input failed schema validation (HTTP 400).
    /// Carries the overall message plus the ordered per-field message lists.
    Validation {
        message: String,
        details: Vec<Vec<String>>,
    },
    /// Missing, invalid or expired credentials (HTTP 401).
    Unauthorized(String),
    /// Authenticated but not permitted (HTTP 403).
    AccessDenied(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint (email, task title) was violated (HTTP 409).
    AlreadyExists(String),
    /// An unexpected server-side failure (HTTP 500).
    Internal(String),
    /// An error originating from the persistence layer (HTTP 500).
    Database(String),
}

impl AppError {
    /// Shorthand for a validation failure with the standard message.
    pub fn validation(details: Vec<Vec<String>>) -> Self {
        AppError::Validation {
            message: "Validation error".to_string(),
            details,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation { message, details } => {
                write!(f, "Validation Error: {} ({:?})", message, details)
            }
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::AccessDenied(msg) => write!(f, "Access Denied: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::AlreadyExists(msg) => write!(f, "Already Exists: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This is the only place where error kinds are translated into status codes
/// and response bodies, so handlers simply return `Result<_, AppError>`.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation { message, details } => {
                HttpResponse::BadRequest().json(json!({
                    "error": message,
                    "details": details
                }))
            }
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::AccessDenied(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::AlreadyExists(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            // Internal detail stays in the server log, never in the body.
            AppError::Internal(msg) | AppError::Database(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; everything else is a database error
/// surfaced to clients as a generic 500.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// Converts JWT processing failures into `Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts bcrypt failures (hashing, malformed digest) into internal errors.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
