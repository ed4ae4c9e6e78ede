//! Shared response envelope and error-to-HTTP conversion.
//!
//! Every endpoint answers with the same JSON wrapper: a `Status` marker,
//! a human-readable `message`, and an optional `Result` payload.
//! `service_error_to_http` is the single place where `ServiceError`
//! variants become status codes; database failures are redacted to a
//! generic message and logged server-side with the raw cause. `ApiJson`
//! keeps body-deserialization rejections inside the same envelope.

use crate::errors::ServiceError;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// "Success", "Error", or the duplicate-registration marker "Exists"
    #[serde(rename = "Status")]
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Response payload (present on success where there is one)
    #[serde(rename = "Result", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success without a payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
            result: None,
        }
    }

    /// Success carrying a payload under `Result`.
    pub fn with_result(result: T, message: impl Into<String>) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
            result: Some(result),
        }
    }

    /// The duplicate-registration marker: HTTP 200 with a distinct
    /// status so the client can redirect to login.
    pub fn exists(message: impl Into<String>) -> Self {
        Self {
            status: "Exists".to_string(),
            message: message.into(),
            result: None,
        }
    }

    /// Uniform failure envelope.
    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status: "Error".to_string(),
            message: message.into(),
            result: None,
        }
    }
}

/// Builds a rejection tuple carrying the serialized failure envelope.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let envelope = ApiResponse::<()>::error(message);
    (status, serde_json::to_string(&envelope).unwrap())
}

/// `Json` extractor whose rejections use the failure envelope.
///
/// A body missing a required field (or carrying the wrong type for one)
/// gets the same 400 "All fields are required." response the handlers
/// return for blank fields, instead of axum's plain-text 422.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::JsonDataError(_)) => Err(error_response(
                StatusCode::BAD_REQUEST,
                "All fields are required.",
            )),
            Err(rejection) => Err(error_response(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

/// Converts a `ServiceError` to the appropriate HTTP rejection.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, message) = match error {
        ServiceError::Validation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::AlreadyExists { entity, identifier } => (
            StatusCode::CONFLICT,
            format!("{} '{}' already exists", entity, identifier),
        ),
        ServiceError::InvalidCredentials { message } => (StatusCode::UNAUTHORIZED, message),
        ServiceError::Unauthenticated { message } => (StatusCode::FORBIDDEN, message),
        ServiceError::InvalidToken { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::PermissionDenied { message } => (StatusCode::FORBIDDEN, message),
        ServiceError::Timeout { message } => {
            tracing::error!("Store timeout: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The data store timed out".to_string(),
            )
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    error_response(status, message)
}
