//! Central module for organizing the application's main API endpoints.
//!
//! Core authentication routes live in the `auth` module; this module
//! carries the CRUD surface plus the shared response envelope.

pub mod appointment;
pub mod common;
pub mod lab_result;
pub mod user;
