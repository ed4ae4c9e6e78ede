//! Core business logic for the authentication system.

use crate::auth::models::{LoginRequest, LoginResponse, UserInfo};
use crate::database::models::{RegisterUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for registration, login, and token issuance.
pub struct AuthService<'a> {
    jwt_utils: JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Builds the service from the injected pool and token utility.
    pub fn new(pool: &'a SqlitePool, jwt_utils: JwtUtils) -> Self {
        AuthService {
            jwt_utils,
            user_service: UserService::new(pool),
        }
    }

    /// Registers a new account.
    pub async fn register(&self, register: RegisterUser) -> ServiceResult<User> {
        self.user_service.register_user(register).await
    }

    /// Authenticates a user and issues a signed token.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(validation_errors) = login_request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let user = self
            .user_service
            .authenticate_user(&login_request.email, &login_request.password)
            .await?;

        let token = self.jwt_utils.generate_token(&user)?;

        Ok(LoginResponse {
            status: "Success".to_string(),
            message: "Login Successful!".to_string(),
            token,
            user: UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
                photo: user.photo,
                role: user.role,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::models::Role;
    use sqlx::sqlite::SqlitePoolOptions;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 5,
            jwt_secret: "test-signing-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
            upload_dir: "./tmp".to_string(),
        }
    }

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn ann() -> RegisterUser {
        RegisterUser {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            role: "Patient".to_string(),
            password: "pw123".to_string(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn login_issues_a_token_that_decodes_to_the_stored_identity() {
        let pool = test_pool().await;
        let config = test_config();
        let jwt = JwtUtils::new(&config);
        let service = AuthService::new(&pool, jwt.clone());

        let registered = service.register(ann()).await.unwrap();

        let response = service
            .login(LoginRequest {
                email: "ann@x.com".to_string(),
                password: "pw123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.status, "Success");
        assert!(!response.token.is_empty());
        assert_eq!(response.user.id, registered.id);

        let claims = jwt.validate_token(&response.token).unwrap();
        assert_eq!(claims.id, registered.id);
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.role, Role::Patient);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new(&test_config());
        let service = AuthService::new(&pool, jwt);

        service.register(ann()).await.unwrap();

        let err = service
            .login(LoginRequest {
                email: "ann@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn login_with_blank_fields_fails_validation() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new(&test_config());
        let service = AuthService::new(&pool, jwt);

        let err = service
            .login(LoginRequest {
                email: String::new(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }
}
