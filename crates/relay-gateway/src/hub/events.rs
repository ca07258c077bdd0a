//! Hub events
//!
//! What sessions submit to the hub, one type per queue.

use relay_core::{ClientId, Message, Position};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

/// A connected client as the hub sees it
///
/// Holds the only strong sender of the client's outbound queue; dropping the
/// member closes the queue and lets the session's writer finish.
#[derive(Debug)]
pub struct Member {
    pub id: ClientId,
    pub position: Position,
    outbound: mpsc::Sender<Message>,
}

impl Member {
    #[must_use]
    pub fn new(id: ClientId, position: Position, outbound: mpsc::Sender<Message>) -> Self {
        Self {
            id,
            position,
            outbound,
        }
    }

    /// Queue a message without waiting
    ///
    /// Returns `false` when the queue is full or already closed, which marks
    /// the member as stalled.
    pub fn deliver(&self, message: Message) -> bool {
        match self.outbound.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                tracing::warn!(
                    client_id = %self.id,
                    kind = %message.kind(),
                    "Outbound queue full"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(client_id = %self.id, "Outbound queue already closed");
                false
            }
        }
    }

    /// The announcement other members receive about this one
    #[must_use]
    pub fn announcement(&self) -> Message {
        Message::PositionUpdate {
            from: self.id,
            position: self.position,
        }
    }
}

/// A member asking to be registered
///
/// The hub answers with the positions of everyone already present. That
/// snapshot travels on the reply instead of the member's outbound queue, so a
/// room larger than the queue cannot stall a newcomer.
#[derive(Debug)]
pub(super) struct JoinRequest {
    pub member: Member,
    pub snapshot: oneshot::Sender<Vec<Message>>,
}

/// A private message, already persisted
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateSend {
    pub to: ClientId,
    pub from: ClientId,
    pub text: String,
}

impl From<PrivateSend> for Message {
    fn from(send: PrivateSend) -> Self {
        Self::Private {
            to: send.to,
            from: send.from,
            text: send.text,
        }
    }
}

/// Text for every member
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastSend {
    pub from: ClientId,
    pub text: String,
}

impl From<BroadcastSend> for Message {
    fn from(send: BroadcastSend) -> Self {
        Self::Broadcast {
            from: send.from,
            text: send.text,
        }
    }
}

/// A member's cursor moved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionChange {
    pub from: ClientId,
    pub position: Position,
}

impl From<PositionChange> for Message {
    fn from(change: PositionChange) -> Self {
        Self::PositionUpdate {
            from: change.from,
            position: change.position,
        }
    }
}
