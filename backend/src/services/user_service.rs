//! User business logic service.
//!
//! Handles registration and credential checks. Duplicate emails are not
//! pre-checked; the insert relies on the store's UNIQUE constraint and
//! the resulting conflict is translated into the duplicate-entity error,
//! so concurrent registrations cannot slip a second row in.

use crate::database::models::{CreateUser, RegisterUser, Role, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use std::str::FromStr;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Registers a new user: presence checks, role parsing, password
    /// hashing, then a single insert.
    ///
    /// # Errors
    /// - `Validation` for missing fields or an unknown role
    /// - `AlreadyExists` when the email is taken
    /// - `InternalError` when hashing fails
    pub async fn register_user(&self, register: RegisterUser) -> ServiceResult<User> {
        if let Err(validation_errors) = register.validate() {
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

        let role = Role::from_str(&register.role).map_err(ServiceError::validation)?;
        let password_hash = hash_password(&register.password)?;

        let repo = UserRepository::new(self.pool);
        let created = repo
            .create_user(CreateUser {
                name: register.name,
                email: register.email.clone(),
                role,
                photo: register.photo,
                password_hash,
            })
            .await;

        match created {
            Err(err) if err.is_unique_violation() => {
                Err(ServiceError::already_exists("User", &register.email))
            }
            other => other,
        }
    }

    /// Checks an email/password pair against the stored credential.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` for an unknown email or a
    /// non-matching password; the two carry distinct client messages.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::invalid_credentials("User not found, please register"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::invalid_credentials("Incorrect Password!"));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::UserRepository;
    use sqlx::sqlite::SqlitePoolOptions;

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
    async fn registration_succeeds_exactly_once_per_email() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let user = service.register_user(ann()).await.unwrap();
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.role, Role::Patient);
        assert_ne!(user.password_hash, "pw123");

        let err = service.register_user(ann()).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));

        // The conflict must not have inserted a second row.
        let stored = UserRepository::new(&pool)
            .list_users_by_role(Role::Patient)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn missing_fields_fail_validation() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let mut incomplete = ann();
        incomplete.password = String::new();

        let err = service.register_user(incomplete).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn unknown_role_fails_validation() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let mut bad_role = ann();
        bad_role.role = "Nurse".to_string();

        let err = service.register_user(bad_role).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn authentication_matches_the_stored_record() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);
        let registered = service.register_user(ann()).await.unwrap();

        let user = service
            .authenticate_user("ann@x.com", "pw123")
            .await
            .unwrap();
        assert_eq!(user.id, registered.id);
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.role, Role::Patient);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_distinct_failures() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);
        service.register_user(ann()).await.unwrap();

        let wrong_password = service
            .authenticate_user("ann@x.com", "pw124")
            .await
            .unwrap_err();
        assert!(
            matches!(&wrong_password, ServiceError::InvalidCredentials { message } if message == "Incorrect Password!")
        );

        let unknown = service
            .authenticate_user("bob@x.com", "pw123")
            .await
            .unwrap_err();
        assert!(
            matches!(&unknown, ServiceError::InvalidCredentials { message } if message == "User not found, please register")
        );
    }
}
