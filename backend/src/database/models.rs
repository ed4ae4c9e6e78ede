//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and
//! retrieved from the database, plus the creation DTOs and the fixed
//! join shapes the list endpoints return. API request payloads live
//! next to their handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use validator::Validate;

/// Account role. Stored as TEXT and constrained by a CHECK in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Admin" => Ok(Role::Admin),
            "Doctor" => Ok(Role::Doctor),
            "Patient" => Ok(Role::Patient),
            _ => Err(format!("Invalid role: {}", input)),
        }
    }
}

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Scheduled" => Ok(AppointmentStatus::Scheduled),
            "Completed" => Ok(AppointmentStatus::Completed),
            "Cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Invalid appointment status: {}", input)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub photo: Option<String>,
    // The hash stays server-side; it is never serialized into a response.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub photo: Option<String>,
    pub password_hash: String,
}

/// Registration payload, before the role is parsed and the password hashed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub department: String,
    pub procedure: String,
    pub status: AppointmentStatus,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub department: String,
    pub procedure: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LabResult {
    pub id: i64,
    pub patient_id: i64,
    pub test_name: String,
    pub results: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateLabResult {
    pub patient_id: i64,
    pub test_name: String,
    pub results: String,
}

/// Appointment row joined with the patient's identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppointmentWithPatient {
    pub appointment_id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub department: String,
    pub procedure: String,
    pub status: AppointmentStatus,
    pub created_date: DateTime<Utc>,
    pub patient_name: String,
    pub patient_photo: Option<String>,
}

/// Appointment row joined with the doctor's identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppointmentWithDoctor {
    pub appointment_id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub department: String,
    pub procedure: String,
    pub status: AppointmentStatus,
    pub created_date: DateTime<Utc>,
    pub doctor_name: String,
    pub doctor_photo: Option<String>,
}

/// Lab result row joined with the patient's identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LabResultWithPatient {
    pub lab_id: i64,
    pub patient_id: i64,
    pub test_name: String,
    pub results: String,
    pub created_date: DateTime<Utc>,
    pub patient_name: String,
    pub patient_photo: Option<String>,
}
