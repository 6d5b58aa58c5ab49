//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP mapping lives in the api layer.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Field-scoped validation error; the field name keys the message in
    /// the response body
    Validation { field: String, message: String },
    /// Delete or transition blocked by existing state; recoverable,
    /// surfaced to the user, nothing changed
    Conflict(String),
    /// Database/persistence error
    Database(String),
}

impl DomainError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation { field, message } => {
                write!(f, "Validation error on '{}': {}", field, message)
            }
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used wherever a store call propagates with ?)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
