//! HTTP routes for the appointment CRUD surface.

use crate::api::appointment::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Creates the appointment router.
pub fn appointment_router() -> Router {
    Router::new()
        .route("/appointment", post(create_appointment))
        .route("/allAppointments", get(all_appointments))
        .route("/appointments", get(appointments_with_doctor))
        .route("/doctorAppointments/{id}", get(doctor_appointments))
        .route("/allDoctorAppointments/{id}", get(all_doctor_appointments))
        .route("/patientAppointments/{id}", get(patient_appointments))
        .route("/appointmentDetails/{id}", get(appointment_details))
        .route(
            "/updateAppointmentStatus/{id}",
            put(update_appointment_status),
        )
}
