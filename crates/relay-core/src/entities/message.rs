//! Message entity - everything the hub can deliver to a client
//!
//! Each kind carries exactly the fields it needs; the loose optional-field
//! envelope only exists at the wire edge in the gateway.

use std::fmt;

use crate::value_objects::{ClientId, Position};

/// Discriminant of a [`Message`], useful for logging and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Join,
    Leave,
    Broadcast,
    Private,
    PositionUpdate,
    Error,
}

impl MessageKind {
    /// Stable lowercase name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Broadcast => "broadcast",
            Self::Private => "private",
            Self::PositionUpdate => "position_update",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A routed message
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Join acknowledgement sent to a newly connected client with its own
    /// identity and starting position
    Join { id: ClientId, position: Position },

    /// A client left the relay
    Leave { from: ClientId },

    /// Text addressed to every connected client
    Broadcast { from: ClientId, text: String },

    /// Text addressed to exactly one client
    Private {
        to: ClientId,
        from: ClientId,
        text: String,
    },

    /// A client's cursor moved (or is being announced to a newcomer)
    PositionUpdate { from: ClientId, position: Position },

    /// Something went wrong handling this client's request.
    ///
    /// `to` names the intended recipient of the request that failed, if any.
    Error { to: Option<ClientId>, text: String },
}

impl Message {
    /// Text returned to a sender whose private message could not be stored
    pub const DELIVERY_FAILED: &'static str = "failed to send your message";

    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Join { .. } => MessageKind::Join,
            Self::Leave { .. } => MessageKind::Leave,
            Self::Broadcast { .. } => MessageKind::Broadcast,
            Self::Private { .. } => MessageKind::Private,
            Self::PositionUpdate { .. } => MessageKind::PositionUpdate,
            Self::Error { .. } => MessageKind::Error,
        }
    }

    /// The client this message originates from, when it has one
    #[must_use]
    pub fn origin(&self) -> Option<ClientId> {
        match self {
            Self::Leave { from }
            | Self::Broadcast { from, .. }
            | Self::Private { from, .. }
            | Self::PositionUpdate { from, .. } => Some(*from),
            Self::Join { .. } | Self::Error { .. } => None,
        }
    }

    /// Error reply for a private message that failed to persist
    #[must_use]
    pub fn delivery_failed(intended_recipient: ClientId) -> Self {
        Self::Error {
            to: Some(intended_recipient),
            text: Self::DELIVERY_FAILED.to_string(),
        }
    }
}
