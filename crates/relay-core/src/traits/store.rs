//! Message store trait (port) - durable append of private messages
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Only the write path lives here; reading
//! history back is not part of the relay.

use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::PrivateMessageRecord;
use crate::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Durably append a private message
    async fn record(&self, record: &PrivateMessageRecord) -> StoreResult<()>;
}

#[async_trait]
impl<T: MessageStore + ?Sized> MessageStore for Arc<T> {
    async fn record(&self, record: &PrivateMessageRecord) -> StoreResult<()> {
        (**self).record(record).await
    }
}
