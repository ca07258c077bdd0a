//! Hub control loop
//!
//! A single task owns the [`Registry`] and drains every event queue. Entering
//! is polled before leaving, and both before routed traffic, so a session's
//! join always lands before its own leave or messages.

use relay_common::HubConfig;
use relay_core::ClientId;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::events::{BroadcastSend, JoinRequest, PositionChange, PrivateSend};
use super::handle::HubHandle;
use super::registry::Registry;

pub struct Hub {
    registry: Registry,
    entering: mpsc::Receiver<JoinRequest>,
    leaving: mpsc::Receiver<ClientId>,
    private: mpsc::Receiver<PrivateSend>,
    broadcast: mpsc::Receiver<BroadcastSend>,
    position: mpsc::Receiver<PositionChange>,
    snapshot: mpsc::Receiver<oneshot::Sender<Vec<ClientId>>>,
}

impl Hub {
    /// Create a hub and the handle that feeds it
    #[must_use]
    pub fn new(config: HubConfig) -> (Self, HubHandle) {
        let buffer = config.event_buffer.max(1);

        let (entering_tx, entering) = mpsc::channel(buffer);
        let (leaving_tx, leaving) = mpsc::channel(buffer);
        let (private_tx, private) = mpsc::channel(buffer);
        let (broadcast_tx, broadcast) = mpsc::channel(buffer);
        let (position_tx, position) = mpsc::channel(buffer);
        let (snapshot_tx, snapshot) = mpsc::channel(buffer);

        let hub = Self {
            registry: Registry::new(),
            entering,
            leaving,
            private,
            broadcast,
            position,
            snapshot,
        };

        let handle = HubHandle {
            entering: entering_tx,
            leaving: leaving_tx,
            private: private_tx,
            broadcast: broadcast_tx,
            position: position_tx,
            snapshot: snapshot_tx,
        };

        (hub, handle)
    }

    /// Create a hub and run it on the tokio runtime
    #[must_use]
    pub fn spawn(config: HubConfig) -> (HubHandle, JoinHandle<()>) {
        let (hub, handle) = Self::new(config);
        let task = tokio::spawn(hub.run());
        (handle, task)
    }

    /// Process events until every handle is gone
    pub async fn run(mut self) {
        tracing::info!("Hub started");

        loop {
            tokio::select! {
                biased;

                Some(request) = self.entering.recv() => self.admit(request),
                Some(id) = self.leaving.recv() => {
                    self.registry.leave(id);
                }
                Some(send) = self.private.recv() => self.registry.route_private(send),
                Some(send) = self.broadcast.recv() => self.registry.route_broadcast(send),
                Some(change) = self.position.recv() => self.registry.route_position(change),
                Some(reply) = self.snapshot.recv() => {
                    // The asker may have given up
                    let _ = reply.send(self.registry.ids());
                }
                else => break,
            }
        }

        tracing::info!(online = self.registry.len(), "Hub stopped");
    }

    fn admit(&mut self, JoinRequest { member, snapshot }: JoinRequest) {
        let id = member.id;
        let fresh = !self.registry.contains(&id);

        if snapshot.send(self.registry.join(member)).is_err() && fresh {
            tracing::debug!(client_id = %id, "Session gone before admission, removing");
            self.registry.leave(id);
        }
    }
}
