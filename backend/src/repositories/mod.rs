//! Database repositories: one type per table, one parameterized
//! statement per operation.
//!
//! All user-supplied values travel as bind parameters; nothing is
//! string-interpolated into SQL. Every statement runs under a finite
//! execution deadline so a wedged store surfaces as a timeout error
//! instead of a hung request.

use crate::errors::{ServiceError, ServiceResult};
use std::future::Future;
use std::time::Duration;

pub mod appointment_repository;
pub mod lab_result_repository;
pub mod user_repository;

/// Upper bound on a single statement's execution time.
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Drives a query future to completion under the statement deadline.
pub(crate) async fn with_statement_timeout<T, F>(fut: F) -> ServiceResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(STATEMENT_TIMEOUT, fut).await {
        Ok(result) => result.map_err(ServiceError::from),
        Err(_) => Err(ServiceError::timeout(
            "Statement exceeded execution deadline",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Paused time auto-advances past the deadline once the future stalls.
    #[tokio::test(start_paused = true)]
    async fn stalled_statement_surfaces_as_a_timeout() {
        let err = with_statement_timeout(std::future::pending::<Result<(), sqlx::Error>>())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn completed_statement_is_untouched_by_the_deadline() {
        let value = with_statement_timeout(std::future::ready(Ok::<_, sqlx::Error>(7)))
            .await
            .unwrap();

        assert_eq!(value, 7);
    }
}
