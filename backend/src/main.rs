//! Main entry point for the EHR backend.
//!
//! Initializes the Axum web server, loads configuration, builds the
//! database connection pool, runs migrations, and registers all API
//! routes and middleware. Startup fails fast on missing configuration,
//! including the JWT signing secret.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use anyhow::Result;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let pool = db.pool().clone();
    let jwt_utils = JwtUtils::new(&config);

    let app = Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .merge(api::appointment::routes::appointment_router())
        .merge(api::lab_result::routes::lab_result_router())
        .merge(api::user::routes::user_router())
        .layer(Extension(pool))
        .layer(Extension(jwt_utils))
        .layer(Extension(config.clone()));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting EHR backend on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::with_result(
        serde_json::json!({
            "service": "EHR Backend",
            "version": "0.1.0"
        }),
        "Welcome to the EHR API",
    ))
}
