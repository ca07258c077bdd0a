//! Error handling utilities for repositories

use relay_core::StoreError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to StoreError
///
/// Pool exhaustion and shutdown are reported as `Unavailable` so callers can
/// tell a transient outage from a rejected row.
pub fn map_db_error(e: SqlxError) -> StoreError {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed => StoreError::Unavailable(e.to_string()),
        SqlxError::Database(ref db_err)
            if db_err.is_check_violation() || db_err.is_foreign_key_violation() =>
        {
            StoreError::Rejected(e.to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}
