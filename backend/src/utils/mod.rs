//! Collection of general utility modules.
//!
//! Small, reusable helpers that sit underneath the domain modules:
//! token handling, password hashing, and photo upload storage.

pub mod jwt;
pub mod password;
pub mod uploads;
