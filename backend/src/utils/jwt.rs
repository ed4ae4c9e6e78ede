//! JWT token utilities for authentication and authorization.
//!
//! Tokens are self-contained HS256 claim bundles; validity is purely a
//! function of signature and expiry, there is no server-side revocation
//! list. The signing secret comes from configuration and the utils are
//! built once at startup, then injected as a request extension.
//!
//! Known limitation: a single static secret means rotating it
//! invalidates every outstanding token.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::{Role, User};
use crate::errors::{ServiceError, ServiceResult};

/// JWT claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub role: Role,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now >= self.exp
    }
}

/// JWT token utility for creating and validating tokens.
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Builds the token utility from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact: a token is invalid at its expiry instant.
        validation.leeway = 0;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Issues a token carrying the user's identity claims.
    pub fn generate_token(&self, user: &User) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            photo: user.photo.clone(),
            role: user.role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validates signature and expiry, returning the decoded claims.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::invalid_token("Invalid token"))
    }
}
