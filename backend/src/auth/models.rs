//! Data structures for authentication-related requests and responses.

use crate::database::models::Role;
use crate::utils::jwt::Claims;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sanitized user identity returned alongside a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub role: Role,
}

/// Login response: envelope fields plus the issued token and identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Status")]
    pub status: String,
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

/// Echo payload for the role-probe routes. The original API reports a
/// lowercase "success" here, kept for client compatibility.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    #[serde(rename = "Status")]
    pub status: String,
    pub role: Role,
    pub message: String,
    pub user: Claims,
}

impl ProbeResponse {
    pub fn new(claims: Claims) -> Self {
        Self {
            status: "success".to_string(),
            role: claims.role(),
            message: "Protected route accessed".to_string(),
            user: claims,
        }
    }
}
