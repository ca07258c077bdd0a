//! PostgreSQL implementation of MessageStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use relay_core::{MessageStore, PrivateMessageRecord, StoreResult};

use super::error::map_db_error;

/// PostgreSQL implementation of MessageStore
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    /// Create a new PgMessageStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    #[instrument(skip(self, record), fields(to = %record.to, from = %record.from))]
    async fn record(&self, record: &PrivateMessageRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO private_messages (recipient, sender, body, sent_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.to.to_string())
        .bind(record.from.to_string())
        .bind(&record.text)
        .bind(record.sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

impl std::fmt::Debug for PgMessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgMessageStore")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}
