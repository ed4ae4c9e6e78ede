//! Database repository for user records.
//!
//! Duplicate emails are not pre-checked here; the UNIQUE constraint on
//! `users.email` reports the conflict and the service layer translates
//! it into the duplicate-entity response.

use crate::database::models::{CreateUser, Role, User};
use crate::errors::ServiceResult;
use crate::repositories::with_statement_timeout;
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns the stored row.
    ///
    /// A duplicate email surfaces as a unique-constraint database error.
    pub async fn create_user(&self, user: CreateUser) -> ServiceResult<User> {
        with_statement_timeout(
            sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (name, email, role, photo, password_hash, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING id, name, email, role, photo, password_hash, created_at
                "#,
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role)
            .bind(&user.photo)
            .bind(&user.password_hash)
            .bind(Utc::now())
            .fetch_one(self.pool),
        )
        .await
    }

    /// Retrieves a user by id.
    pub async fn get_user_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        with_statement_timeout(
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, role, photo, password_hash, created_at
                FROM users WHERE id = ?
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool),
        )
        .await
    }

    /// Retrieves a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        with_statement_timeout(
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, role, photo, password_hash, created_at
                FROM users WHERE email = ?
                "#,
            )
            .bind(email)
            .fetch_optional(self.pool),
        )
        .await
    }

    /// Lists all users holding a role, newest first.
    pub async fn list_users_by_role(&self, role: Role) -> ServiceResult<Vec<User>> {
        with_statement_timeout(
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, role, photo, password_hash, created_at
                FROM users WHERE role = ? ORDER BY id DESC
                "#,
            )
            .bind(role)
            .fetch_all(self.pool),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
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

    fn new_user(name: &str, email: &str, role: Role) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            role,
            photo: None,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_returns_the_stored_row() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo
            .create_user(new_user("Ann", "ann@x.com", Role::Patient))
            .await
            .unwrap();

        assert!(user.id > 0);
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.role, Role::Patient);

        let fetched = repo.get_user_by_email("ann@x.com").await.unwrap().unwrap();
        assert_eq!(fetched.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_user(new_user("Ann", "ann@x.com", Role::Patient))
            .await
            .unwrap();
        let err = repo
            .create_user(new_user("Other Ann", "ann@x.com", Role::Doctor))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert!(matches!(err, ServiceError::Database { .. }));
    }

    #[tokio::test]
    async fn role_listing_filters_and_orders_newest_first() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create_user(new_user("Dr. Gray", "gray@x.com", Role::Doctor))
            .await
            .unwrap();
        repo.create_user(new_user("Ann", "ann@x.com", Role::Patient))
            .await
            .unwrap();
        repo.create_user(new_user("Dr. Wu", "wu@x.com", Role::Doctor))
            .await
            .unwrap();

        let doctors = repo.list_users_by_role(Role::Doctor).await.unwrap();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].name, "Dr. Wu");
        assert_eq!(doctors[1].name, "Dr. Gray");
        assert!(doctors.iter().all(|u| u.role == Role::Doctor));
    }
}
