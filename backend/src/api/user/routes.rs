//! HTTP routes for the role-scoped user listings.

use crate::api::user::handlers::*;
use axum::{Router, routing::get};

/// Creates the user listing router.
pub fn user_router() -> Router {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/patients", get(list_patients))
}
