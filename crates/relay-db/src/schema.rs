//! Schema bootstrap
//!
//! The relay owns a single append-only table, created on startup if missing.

use sqlx::PgPool;
use tracing::instrument;

const CREATE_PRIVATE_MESSAGES: &str = r#"
    CREATE TABLE IF NOT EXISTS private_messages (
        id          BIGSERIAL PRIMARY KEY,
        recipient   TEXT        NOT NULL,
        sender      TEXT        NOT NULL,
        body        TEXT        NOT NULL,
        sent_at     TIMESTAMPTZ NOT NULL
    )
"#;

const CREATE_CONVERSATION_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_private_messages_conversation
        ON private_messages (recipient, sender, sent_at)
"#;

/// Create the `private_messages` table and its index if they do not exist
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRIVATE_MESSAGES).execute(pool).await?;
    sqlx::query(CREATE_CONVERSATION_INDEX).execute(pool).await?;

    tracing::debug!("private_messages schema ready");

    Ok(())
}
