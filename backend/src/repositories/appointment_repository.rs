//! Database repository for appointment records.
//!
//! List shapes are fixed joins against the users table: patient-facing
//! lists carry the doctor's identity, doctor-facing lists carry the
//! patient's.

use crate::database::models::{
    Appointment, AppointmentStatus, AppointmentWithDoctor, AppointmentWithPatient,
    CreateAppointment,
};
use crate::errors::ServiceResult;
use crate::repositories::with_statement_timeout;
use chrono::Utc;
use sqlx::SqlitePool;

const SELECT_WITH_PATIENT: &str = r#"
SELECT
    a.id AS appointment_id,
    a.patient_id,
    a.doctor_id,
    a.appointment_date,
    a.department,
    a.procedure,
    a.status,
    a.created_date,
    u.name AS patient_name,
    u.photo AS patient_photo
FROM appointments a
JOIN users u ON a.patient_id = u.id
"#;

const SELECT_WITH_DOCTOR: &str = r#"
SELECT
    a.id AS appointment_id,
    a.patient_id,
    a.doctor_id,
    a.appointment_date,
    a.department,
    a.procedure,
    a.status,
    a.created_date,
    u.name AS doctor_name,
    u.photo AS doctor_photo
FROM appointments a
JOIN users u ON a.doctor_id = u.id
"#;

/// Repository for appointment database operations.
pub struct AppointmentRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> AppointmentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new appointment; status starts as Scheduled.
    pub async fn create_appointment(
        &self,
        appointment: CreateAppointment,
    ) -> ServiceResult<Appointment> {
        with_statement_timeout(
            sqlx::query_as::<_, Appointment>(
                r#"
                INSERT INTO appointments
                    (patient_id, doctor_id, appointment_date, department, procedure, status, created_date)
                VALUES (?, ?, ?, ?, ?, 'Scheduled', ?)
                RETURNING id, patient_id, doctor_id, appointment_date, department,
                          procedure, status, created_date
                "#,
            )
            .bind(appointment.patient_id)
            .bind(appointment.doctor_id)
            .bind(&appointment.appointment_date)
            .bind(&appointment.department)
            .bind(&appointment.procedure)
            .bind(Utc::now())
            .fetch_one(self.pool),
        )
        .await
    }

    /// All appointments joined with the patient's identity.
    pub async fn list_with_patient(&self) -> ServiceResult<Vec<AppointmentWithPatient>> {
        with_statement_timeout(
            sqlx::query_as::<_, AppointmentWithPatient>(SELECT_WITH_PATIENT)
                .fetch_all(self.pool),
        )
        .await
    }

    /// All appointments joined with the doctor's identity.
    pub async fn list_with_doctor(&self) -> ServiceResult<Vec<AppointmentWithDoctor>> {
        with_statement_timeout(
            sqlx::query_as::<_, AppointmentWithDoctor>(SELECT_WITH_DOCTOR).fetch_all(self.pool),
        )
        .await
    }

    /// Every appointment assigned to a doctor.
    pub async fn list_for_doctor(
        &self,
        doctor_id: i64,
    ) -> ServiceResult<Vec<AppointmentWithPatient>> {
        let sql = format!("{} WHERE a.doctor_id = ?", SELECT_WITH_PATIENT);
        with_statement_timeout(
            sqlx::query_as::<_, AppointmentWithPatient>(&sql)
                .bind(doctor_id)
                .fetch_all(self.pool),
        )
        .await
    }

    /// Only the Scheduled appointments assigned to a doctor.
    pub async fn list_scheduled_for_doctor(
        &self,
        doctor_id: i64,
    ) -> ServiceResult<Vec<AppointmentWithPatient>> {
        let sql = format!(
            "{} WHERE a.doctor_id = ? AND a.status = 'Scheduled'",
            SELECT_WITH_PATIENT
        );
        with_statement_timeout(
            sqlx::query_as::<_, AppointmentWithPatient>(&sql)
                .bind(doctor_id)
                .fetch_all(self.pool),
        )
        .await
    }

    /// Every appointment booked by a patient, joined with the doctor.
    pub async fn list_for_patient(
        &self,
        patient_id: i64,
    ) -> ServiceResult<Vec<AppointmentWithDoctor>> {
        let sql = format!("{} WHERE a.patient_id = ?", SELECT_WITH_DOCTOR);
        with_statement_timeout(
            sqlx::query_as::<_, AppointmentWithDoctor>(&sql)
                .bind(patient_id)
                .fetch_all(self.pool),
        )
        .await
    }

    /// Detail lookup by appointment id, joined with the patient.
    pub async fn get_detail_by_id(
        &self,
        id: i64,
    ) -> ServiceResult<Vec<AppointmentWithPatient>> {
        let sql = format!("{} WHERE a.id = ?", SELECT_WITH_PATIENT);
        with_statement_timeout(
            sqlx::query_as::<_, AppointmentWithPatient>(&sql)
                .bind(id)
                .fetch_all(self.pool),
        )
        .await
    }

    /// Sets the status of an appointment, returning affected row count.
    pub async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> ServiceResult<u64> {
        let result = with_statement_timeout(
            sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
                .bind(status)
                .bind(id)
                .execute(self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}
