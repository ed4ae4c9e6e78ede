//! Middleware for protecting authenticated routes and handling
//! authorization.
//!
//! `jwt_auth` validates the bearer token and attaches the decoded
//! claims to the request; the role guards run after it and reject
//! tokens whose role does not match the route. A missing token is a
//! 403, a present-but-invalid token is a 400.

use crate::api::common::service_error_to_http;
use crate::database::models::Role;
use crate::errors::ServiceError;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware.
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    let jwt_utils = request
        .extensions()
        .get::<JwtUtils>()
        .cloned()
        .ok_or_else(|| {
            service_error_to_http(ServiceError::internal_error("Token utility not injected"))
        })?;

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    // Missing or non-Bearer header: the caller never authenticated.
    let Some(token) = auth_header.and_then(|header| header.strip_prefix("Bearer ")) else {
        return Err(service_error_to_http(ServiceError::unauthenticated(
            "User not authenticated!",
        )));
    };

    match jwt_utils.validate_token(token) {
        Ok(claims) => {
            // Claims ride along in request extensions for handlers and
            // the role guards.
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

async fn role_guard(
    request: Request,
    next: Next,
    required: Role,
) -> Result<Response, (StatusCode, String)> {
    let claims = request.extensions().get::<Claims>().ok_or_else(|| {
        service_error_to_http(ServiceError::unauthenticated("User not authenticated!"))
    })?;

    if !claims.has_role(required) {
        return Err(service_error_to_http(ServiceError::permission_denied(
            format!("Access restricted to {} accounts", required),
        )));
    }

    Ok(next.run(request).await)
}

/// Admin role authorization middleware; runs after `jwt_auth`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    role_guard(request, next, Role::Admin).await
}

/// Doctor role authorization middleware; runs after `jwt_auth`.
pub async fn require_doctor(
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    role_guard(request, next, Role::Doctor).await
}

/// Patient role authorization middleware; runs after `jwt_auth`.
pub async fn require_patient(
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    role_guard(request, next, Role::Patient).await
}
