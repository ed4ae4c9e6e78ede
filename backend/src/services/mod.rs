//! Business logic services that sit between handlers and repositories.

pub mod user_service;
