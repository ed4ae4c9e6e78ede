//! Global application error types.
//!
//! `ServiceError` is the single error taxonomy shared by repositories,
//! services, and handlers. The API layer maps each variant to an HTTP
//! status and the uniform response envelope; raw database errors never
//! leave the process.

use thiserror::Error;

/// Generic service error used across all entities.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    /// Login failure: unknown email or non-matching password.
    #[error("{message}")]
    InvalidCredentials { message: String },

    /// Request reached a protected route without a bearer token.
    #[error("{message}")]
    Unauthenticated { message: String },

    /// Bearer token present but malformed, tampered, or expired.
    #[error("{message}")]
    InvalidToken { message: String },

    /// Authenticated but the claimed role is not allowed on this route.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// A statement exceeded the execution timeout.
    #[error("Store timeout: {message}")]
    Timeout { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// True when the underlying database error is a unique-constraint
    /// violation, e.g. a duplicate email on registration.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database { source } => source
                .as_database_error()
                .is_some_and(|e| e.is_unique_violation()),
            _ => false,
        }
    }
}
