//! Handler functions for appointment API endpoints.
//!
//! Thin orchestration only: presence checks, a repository call, and the
//! response envelope. No business-rule validation happens here (no
//! future-date checks, no verification that `doctorId` belongs to a
//! Doctor).

use crate::api::common::{ApiJson, ApiResponse, error_response, service_error_to_http};
use crate::database::models::{
    AppointmentStatus, AppointmentWithDoctor, AppointmentWithPatient, CreateAppointment,
};
use crate::errors::ServiceError;
use crate::repositories::appointment_repository::AppointmentRepository;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;
use validator::Validate;

/// Appointment creation payload, field names as the client sends them.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub doctor_id: i64,

    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,

    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,

    #[validate(length(min = 1, message = "Procedure is required"))]
    pub procedure: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Status-update acknowledgement; this endpoint keeps its historical
/// `success` boolean shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
}

/// Create an appointment; status starts as Scheduled.
#[axum::debug_handler]
pub async fn create_appointment(
    Extension(pool): Extension<SqlitePool>,
    ApiJson(payload): ApiJson<CreateAppointmentRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    if payload.validate().is_err() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "All fields are required.",
        ));
    }

    let repo = AppointmentRepository::new(&pool);
    match repo
        .create_appointment(CreateAppointment {
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            appointment_date: payload.date,
            department: payload.department,
            procedure: payload.procedure,
        })
        .await
    {
        Ok(_) => Ok(Json(ApiResponse::success(
            "Appointment Successfully Created!",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// All appointments joined with the patient's identity.
#[axum::debug_handler]
pub async fn all_appointments(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<AppointmentWithPatient>>>, (StatusCode, String)> {
    let repo = AppointmentRepository::new(&pool);
    match repo.list_with_patient().await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Appointments retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// All appointments joined with the doctor's identity.
#[axum::debug_handler]
pub async fn appointments_with_doctor(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<AppointmentWithDoctor>>>, (StatusCode, String)> {
    let repo = AppointmentRepository::new(&pool);
    match repo.list_with_doctor().await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Appointments retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Scheduled appointments assigned to a doctor.
#[axum::debug_handler]
pub async fn doctor_appointments(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<AppointmentWithPatient>>>, (StatusCode, String)> {
    let repo = AppointmentRepository::new(&pool);
    match repo.list_scheduled_for_doctor(id).await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Appointments retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Every appointment assigned to a doctor, regardless of status.
#[axum::debug_handler]
pub async fn all_doctor_appointments(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<AppointmentWithPatient>>>, (StatusCode, String)> {
    let repo = AppointmentRepository::new(&pool);
    match repo.list_for_doctor(id).await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Appointments retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Every appointment booked by a patient, joined with the doctor.
#[axum::debug_handler]
pub async fn patient_appointments(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<AppointmentWithDoctor>>>, (StatusCode, String)> {
    let repo = AppointmentRepository::new(&pool);
    match repo.list_for_patient(id).await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Appointments retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Single appointment detail joined with the patient.
#[axum::debug_handler]
pub async fn appointment_details(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<AppointmentWithPatient>>>, (StatusCode, String)> {
    let repo = AppointmentRepository::new(&pool);
    match repo.get_detail_by_id(id).await {
        Ok(rows) => Ok(Json(ApiResponse::with_result(
            rows,
            "Appointment retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Set the status of an appointment.
#[axum::debug_handler]
pub async fn update_appointment_status(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<Json<StatusUpdateResponse>, (StatusCode, String)> {
    let status = AppointmentStatus::from_str(&payload.status)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    let repo = AppointmentRepository::new(&pool);
    match repo.update_status(id, status).await {
        Ok(0) => Err(service_error_to_http(ServiceError::not_found(
            "Appointment",
            id.to_string(),
        ))),
        Ok(_) => Ok(Json(StatusUpdateResponse {
            success: true,
            message: "Appointment successfully updated.".to_string(),
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}
