//! Private message record - the row handed to the persistence port

use chrono::{DateTime, Utc};

use crate::value_objects::ClientId;

/// A private message as it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessageRecord {
    pub to: ClientId,
    pub from: ClientId,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl PrivateMessageRecord {
    /// Create a record stamped with the current UTC time
    pub fn new(to: ClientId, from: ClientId, text: impl Into<String>) -> Self {
        Self {
            to,
            from,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}
