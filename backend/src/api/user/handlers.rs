//! Handler functions for the role-scoped user listings.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::database::models::{Role, User};
use crate::repositories::user_repository::UserRepository;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// All users with the Doctor role, newest first.
#[axum::debug_handler]
pub async fn list_doctors(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<User>>>, (StatusCode, String)> {
    let repo = UserRepository::new(&pool);
    match repo.list_users_by_role(Role::Doctor).await {
        Ok(users) => Ok(Json(ApiResponse::with_result(
            users,
            "Doctors retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// All users with the Patient role, newest first.
#[axum::debug_handler]
pub async fn list_patients(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<User>>>, (StatusCode, String)> {
    let repo = UserRepository::new(&pool);
    match repo.list_users_by_role(Role::Patient).await {
        Ok(users) => Ok(Json(ApiResponse::with_result(
            users,
            "Patients retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
