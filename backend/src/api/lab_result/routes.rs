//! HTTP routes for the lab result surface.

use crate::api::lab_result::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the lab result router.
pub fn lab_result_router() -> Router {
    Router::new()
        .route("/labResults", post(create_lab_result).get(list_lab_results))
        .route("/patientResults/{id}", get(patient_results))
}
