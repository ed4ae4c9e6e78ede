//! Handler functions for authentication-related API endpoints.
//!
//! Registration accepts a multipart form so a profile photo can ride
//! along; login answers with the token in the body and mirrors it into
//! an HTTP-only `token` cookie.

use crate::api::common::{ApiJson, ApiResponse, error_response, service_error_to_http};
use crate::auth::models::{LoginRequest, ProbeResponse};
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::RegisterUser;
use crate::errors::ServiceError;
use crate::utils::jwt::{Claims, JwtUtils};
use crate::utils::uploads::save_photo;
use axum::{
    extract::{Extension, Multipart, multipart::Field},
    http::{StatusCode, header},
    response::{IntoResponse, Json as ResponseJson, Response},
};
use sqlx::SqlitePool;

async fn read_text(field: Field<'_>) -> Result<String, (StatusCode, String)> {
    field.text().await.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Malformed form data: {}", e),
        )
    })
}

/// Handle user registration (multipart form, optional photo upload).
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Config>,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let mut name = None;
    let mut email = None;
    let mut role = None;
    let mut password = None;
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Malformed form data: {}", e),
        )
    })? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(read_text(field).await?),
            Some("email") => email = Some(read_text(field).await?),
            Some("role") => role = Some(read_text(field).await?),
            Some("password") => password = Some(read_text(field).await?),
            Some("photo") => {
                let original = field.file_name().unwrap_or("photo").to_string();
                let data = field.bytes().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Malformed form data: {}", e),
                    )
                })?;
                let filename = save_photo(&config.upload_dir, "photo", &original, &data)
                    .await
                    .map_err(service_error_to_http)?;
                photo = Some(filename);
            }
            _ => {}
        }
    }

    let (Some(name), Some(email), Some(role), Some(password)) = (name, email, role, password)
    else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "All fields are required.",
        ));
    };

    let auth_service = AuthService::new(&pool, jwt_utils);
    match auth_service
        .register(RegisterUser {
            name,
            email,
            role,
            password,
            photo,
        })
        .await
    {
        Ok(_) => Ok(ResponseJson(ApiResponse::success(
            "User Successfully Registered!",
        ))),
        // Duplicate email is not an HTTP error: the client uses the
        // distinct marker to redirect to login.
        Err(ServiceError::AlreadyExists { .. }) => Ok(ResponseJson(ApiResponse::exists(
            "User already exists. Please log in.",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request.
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Response, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, jwt_utils);

    match auth_service.login(payload).await {
        Ok(login_response) => {
            let cookie = format!("token={}; HttpOnly; Path=/", login_response.token);
            let cookie = header::HeaderValue::from_str(&cookie).map_err(|e| {
                service_error_to_http(ServiceError::internal_error(format!(
                    "Cookie encoding failed: {}",
                    e
                )))
            })?;

            let mut response = ResponseJson(login_response).into_response();
            response.headers_mut().append(header::SET_COOKIE, cookie);
            Ok(response)
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Echo the authenticated identity back to the caller.
///
/// Mounted behind `jwt_auth` plus the matching role guard on each of
/// the `/admin`, `/doctor`, and `/patient` probe routes.
#[axum::debug_handler]
pub async fn probe(Extension(claims): Extension<Claims>) -> ResponseJson<ProbeResponse> {
    ResponseJson(ProbeResponse::new(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::post};
    use serde_json::Value;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    async fn login_app() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let jwt = JwtUtils::new(&Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 5,
            jwt_secret: "test-signing-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
            upload_dir: "./tmp".to_string(),
        });

        Router::new()
            .route("/login", post(login))
            .layer(Extension(pool))
            .layer(Extension(jwt))
    }

    #[tokio::test]
    async fn login_body_missing_a_field_gets_the_uniform_envelope() {
        let response = login_app()
            .await
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"email":"ann@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["Status"], "Error");
        assert_eq!(body["message"], "All fields are required.");
    }
}
