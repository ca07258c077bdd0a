//! Persistence errors - failures reported by a message store

use thiserror::Error;

/// Errors a message store can report
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Message rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::Rejected(_) => "MESSAGE_REJECTED",
        }
    }
}
