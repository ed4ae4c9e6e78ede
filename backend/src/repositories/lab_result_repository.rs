//! Database repository for lab result records.
//!
//! Lab results are insert-only; every read joins the patient's identity.

use crate::database::models::{CreateLabResult, LabResult, LabResultWithPatient};
use crate::errors::ServiceResult;
use crate::repositories::with_statement_timeout;
use chrono::Utc;
use sqlx::SqlitePool;

const SELECT_WITH_PATIENT: &str = r#"
SELECT
    l.id AS lab_id,
    l.patient_id,
    l.test_name,
    l.results,
    l.created_date,
    u.name AS patient_name,
    u.photo AS patient_photo
FROM lab_results l
JOIN users u ON l.patient_id = u.id
"#;

/// Repository for lab result database operations.
pub struct LabResultRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> LabResultRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new lab result and returns the stored row.
    pub async fn create_lab_result(&self, lab: CreateLabResult) -> ServiceResult<LabResult> {
        with_statement_timeout(
            sqlx::query_as::<_, LabResult>(
                r#"
                INSERT INTO lab_results (patient_id, test_name, results, created_date)
                VALUES (?, ?, ?, ?)
                RETURNING id, patient_id, test_name, results, created_date
                "#,
            )
            .bind(lab.patient_id)
            .bind(&lab.test_name)
            .bind(&lab.results)
            .bind(Utc::now())
            .fetch_one(self.pool),
        )
        .await
    }

    /// All lab results joined with the patient, newest first.
    pub async fn list_with_patient(&self) -> ServiceResult<Vec<LabResultWithPatient>> {
        let sql = format!("{} ORDER BY l.id DESC", SELECT_WITH_PATIENT);
        with_statement_timeout(
            sqlx::query_as::<_, LabResultWithPatient>(&sql).fetch_all(self.pool),
        )
        .await
    }

    /// Lab results for one patient, newest first.
    pub async fn list_for_patient(
        &self,
        patient_id: i64,
    ) -> ServiceResult<Vec<LabResultWithPatient>> {
        let sql = format!(
            "{} WHERE l.patient_id = ? ORDER BY l.id DESC",
            SELECT_WITH_PATIENT
        );
        with_statement_timeout(
            sqlx::query_as::<_, LabResultWithPatient>(&sql)
                .bind(patient_id)
                .fetch_all(self.pool),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{CreateUser, Role};
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

    async fn seed_patient(pool: &SqlitePool, name: &str, email: &str) -> i64 {
        UserRepository::new(pool)
            .create_user(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                role: Role::Patient,
                photo: None,
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn created_result_appears_in_patient_listing() {
        let pool = test_pool().await;
        let patient_id = seed_patient(&pool, "Ann", "ann@x.com").await;
        let repo = LabResultRepository::new(&pool);

        let created = repo
            .create_lab_result(CreateLabResult {
                patient_id,
                test_name: "CBC".to_string(),
                results: "Within normal limits".to_string(),
            })
            .await
            .unwrap();

        let rows = repo.list_for_patient(patient_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lab_id, created.id);
        assert_eq!(rows[0].test_name, "CBC");
        assert_eq!(rows[0].patient_name, "Ann");
    }

    #[tokio::test]
    async fn global_listing_is_newest_first_and_scoped_listing_filters() {
        let pool = test_pool().await;
        let ann = seed_patient(&pool, "Ann", "ann@x.com").await;
        let bob = seed_patient(&pool, "Bob", "bob@x.com").await;
        let repo = LabResultRepository::new(&pool);

        repo.create_lab_result(CreateLabResult {
            patient_id: ann,
            test_name: "CBC".to_string(),
            results: "ok".to_string(),
        })
        .await
        .unwrap();
        repo.create_lab_result(CreateLabResult {
            patient_id: bob,
            test_name: "Lipid panel".to_string(),
            results: "ok".to_string(),
        })
        .await
        .unwrap();

        let all = repo.list_with_patient().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].test_name, "Lipid panel");

        let anns = repo.list_for_patient(ann).await.unwrap();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].patient_name, "Ann");
    }
}
