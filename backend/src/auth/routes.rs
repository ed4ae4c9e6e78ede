//! Defines the HTTP routes for authentication and the role probes.
//!
//! Layer order matters on the probe routes: `jwt_auth` is the outer
//! layer so claims exist by the time the role guard runs.

use crate::auth::handlers::{login, probe, register};
use crate::auth::middleware::{jwt_auth, require_admin, require_doctor, require_patient};
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes.
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/admin",
            get(probe)
                .layer(middleware::from_fn(require_admin))
                .layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/doctor",
            get(probe)
                .layer(middleware::from_fn(require_doctor))
                .layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/patient",
            get(probe)
                .layer(middleware::from_fn(require_patient))
                .layer(middleware::from_fn(jwt_auth)),
        )
}
