//! Handler functions for lab result API endpoints.

use crate::api::common::{ApiJson, ApiResponse, error_response, service_error_to_http};
use crate::database::models::{CreateLabResult, LabResultWithPatient};
use crate::repositories::lab_result_repository::LabResultRepository;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

/// Lab result creation payload, field names as the client sends them.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabResultRequest {
    pub patient_id: i64,

    #[validate(length(min = 1, message = "Test name is required"))]
    pub test_name: String,

    #[validate(length(min = 1, message = "Lab results are required"))]
    pub lab_results: String,
}

/// Create a lab result; rows are immutable once stored.
#[axum::debug_handler]
pub async fn create_lab_result(
    Extension(pool): Extension<SqlitePool>,
    ApiJson(payload): ApiJson<CreateLabResultRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    if payload.validate().is_err() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "All fields are required.",
        ));
    }

    let repo = LabResultRepository::new(&pool);
    match repo
        .create_lab_result(CreateLabResult {
            patient_id: payload.patient_id,
            test_name: payload.test_name,
            results: payload.lab_results,
        })
        .await
    {
        Ok(_) => Ok(Json(ApiResponse::success(
            "Lab Results Successfully Created!",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// All lab results joined with the patient's identity.
#[axum::debug_handler]
pub async fn list_lab_results(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<LabResultWithPatient>>>, (StatusCode, String)> {
    let repo = LabResultRepository::new(&pool);
    match repo.list_with_patient().await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Lab results retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Lab results for one patient.
#[axum::debug_handler]
pub async fn patient_results(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<LabResultWithPatient>>>, (StatusCode, String)> {
    let repo = LabResultRepository::new(&pool);
    match repo.list_for_patient(id).await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Lab results retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::post};
    use serde_json::Value;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    async fn lab_result_app() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        Router::new()
            .route("/labResults", post(create_lab_result))
            .layer(Extension(pool))
    }

    async fn post_lab_result(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/labResults")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn body_missing_a_field_gets_the_uniform_envelope() {
        let (status, body) = post_lab_result(
            lab_result_app().await,
            r#"{"testName":"CBC","labResults":"ok"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Status"], "Error");
        assert_eq!(body["message"], "All fields are required.");
    }

    #[tokio::test]
    async fn blank_field_gets_the_same_envelope() {
        let (status, body) = post_lab_result(
            lab_result_app().await,
            r#"{"patientId":1,"testName":"","labResults":"ok"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Status"], "Error");
        assert_eq!(body["message"], "All fields are required.");
    }
}
