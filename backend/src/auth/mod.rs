//! Authentication and authorization: registration, login, token
//! validation middleware, and the role-probe routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
