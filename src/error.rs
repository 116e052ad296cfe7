//!
//! # Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Services signal domain failures (duplicate user, invalid
//! credentials, missing or foreign tasks) as `AppError` values; only this
//! boundary layer maps them to transport-level status codes.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return `Result<_, AppError>` and have failures rendered as JSON bodies of
//! the shape `{"timestamp": ..., "error": ...}`. `From` implementations for
//! `sqlx::Error`, `validator::ValidationErrors`, `jsonwebtoken::errors::Error`
//! and `bcrypt::BcryptError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use chrono::Utc;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all failure modes of the application.
///
/// Domain errors carry a message intended for the client; storage and other
/// unclassified errors are collapsed into a generic internal error response
/// so no internal detail leaks to the caller.
#[derive(Debug)]
pub enum AppError {
    /// Registration attempted with a username that already exists (HTTP 400).
    DuplicateUser(String),
    /// Login failed: unknown username or wrong password (HTTP 401).
    /// The two cases are deliberately indistinguishable to the caller.
    InvalidCredentials(String),
    /// A presented bearer token was malformed, badly signed or expired (HTTP 401).
    InvalidToken(String),
    /// An authenticated identity was required but none was resolved (HTTP 401).
    Unauthorized(String),
    /// The resource exists but belongs to a different owner (HTTP 403).
    Forbidden(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// Input failed validation before reaching a service (HTTP 400).
    Validation(String),
    /// An error from the persistence layer (HTTP 500, generic body).
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500, generic body).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateUser(msg) => write!(f, "Duplicate user: {}", msg),
            AppError::InvalidCredentials(msg) => write!(f, "Invalid credentials: {}", msg),
            AppError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

fn error_body(message: &str) -> serde_json::Value {
    json!({
        "timestamp": Utc::now(),
        "error": message
    })
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::DuplicateUser(msg) => HttpResponse::BadRequest().json(error_body(msg)),
            AppError::InvalidCredentials(msg) => HttpResponse::Unauthorized().json(error_body(msg)),
            AppError::InvalidToken(msg) => HttpResponse::Unauthorized().json(error_body(msg)),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(error_body(msg)),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(error_body(msg)),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(error_body(msg)),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(error_body(msg)),
            // Storage and unclassified failures are presented identically; the
            // real cause is only logged server-side.
            AppError::Database(msg) | AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(error_body("Internal error"))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
