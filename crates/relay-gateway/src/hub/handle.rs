//! Producer side of the hub

use relay_core::{ClientId, Message};
use tokio::sync::{mpsc, oneshot};

use super::events::{BroadcastSend, JoinRequest, Member, PositionChange, PrivateSend};

/// Hub errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HubError {
    #[error("hub is no longer running")]
    Closed,
}

impl<T> From<mpsc::error::SendError<T>> for HubError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::Closed
    }
}

/// Cloneable handle for submitting events to the hub
///
/// The hub loop stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct HubHandle {
    pub(super) entering: mpsc::Sender<JoinRequest>,
    pub(super) leaving: mpsc::Sender<ClientId>,
    pub(super) private: mpsc::Sender<PrivateSend>,
    pub(super) broadcast: mpsc::Sender<BroadcastSend>,
    pub(super) position: mpsc::Sender<PositionChange>,
    pub(super) snapshot: mpsc::Sender<oneshot::Sender<Vec<ClientId>>>,
}

impl HubHandle {
    /// Register a member
    ///
    /// Resolves once the hub has admitted it, with one position update per
    /// member that was already present.
    pub async fn join(&self, member: Member) -> Result<Vec<Message>, HubError> {
        let (snapshot, response) = oneshot::channel();
        self.entering.send(JoinRequest { member, snapshot }).await?;
        response.await.map_err(|_| HubError::Closed)
    }

    /// Unregister a member; unknown ids are ignored by the hub
    pub async fn leave(&self, id: ClientId) -> Result<(), HubError> {
        self.leaving.send(id).await?;
        Ok(())
    }

    pub async fn send_private(&self, send: PrivateSend) -> Result<(), HubError> {
        self.private.send(send).await?;
        Ok(())
    }

    pub async fn broadcast(&self, send: BroadcastSend) -> Result<(), HubError> {
        self.broadcast.send(send).await?;
        Ok(())
    }

    pub async fn update_position(&self, change: PositionChange) -> Result<(), HubError> {
        self.position.send(change).await?;
        Ok(())
    }

    /// Ids of the members registered right now
    pub async fn members(&self) -> Result<Vec<ClientId>, HubError> {
        let (reply, response) = oneshot::channel();
        self.snapshot.send(reply).await?;
        response.await.map_err(|_| HubError::Closed)
    }
}
