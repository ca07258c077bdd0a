//! Client sessions
//!
//! One session per connection. It acknowledges the client with its identity,
//! registers with the hub, then runs a read loop on the current task and a
//! write loop on a spawned one until the peer goes away.

mod reader;
mod writer;

use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream};
use relay_core::{ClientId, Message, MessageStore, Position};
use tokio::sync::mpsc;

use crate::hub::{HubHandle, Member};
use crate::protocol::{encode, CloseCode};
use crate::transport::{Frame, TransportError};
use reader::{EndReason, Reader};
use writer::write_loop;

/// Everything a session needs from the outside
#[derive(Clone)]
pub struct SessionConfig {
    pub hub: HubHandle,
    pub store: Arc<dyn MessageStore>,
    /// Capacity of the outbound queue
    pub outbound_buffer: usize,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("hub", &self.hub)
            .field("store", &"MessageStore")
            .field("outbound_buffer", &self.outbound_buffer)
            .finish()
    }
}

/// Serve a new client with a fresh id at a random position
pub async fn serve<S, R>(config: SessionConfig, sink: S, stream: R)
where
    S: Sink<Frame, Error = TransportError> + Unpin + Send + 'static,
    R: Stream<Item = Result<Frame, TransportError>> + Unpin + Send,
{
    serve_as(config, ClientId::generate(), Position::random(), sink, stream).await;
}

/// Serve a client under a given identity and starting position
pub async fn serve_as<S, R>(
    config: SessionConfig,
    id: ClientId,
    position: Position,
    mut sink: S,
    stream: R,
) where
    S: Sink<Frame, Error = TransportError> + Unpin + Send + 'static,
    R: Stream<Item = Result<Frame, TransportError>> + Unpin + Send,
{
    // The acknowledgement goes out before the client is visible to anyone
    let ack = match encode(&Message::Join { id, position }) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(client_id = %id, error = %e, "Failed to encode join acknowledgement");
            return;
        }
    };
    if let Err(e) = sink.send(Frame::Text(ack)).await {
        tracing::warn!(client_id = %id, error = %e, "Failed to send join acknowledgement");
        return;
    }

    let (outbound_tx, outbound_rx) = mpsc::channel(config.outbound_buffer.max(1));
    let own_queue = outbound_tx.downgrade();

    let Ok(snapshot) = config.hub.join(Member::new(id, position, outbound_tx)).await else {
        tracing::warn!(client_id = %id, "Hub unavailable, dropping connection");
        let _ = sink.close().await;
        return;
    };

    tracing::info!(client_id = %id, peers = snapshot.len(), "Session started");

    // Everyone already present is written ahead of the queued traffic
    if let Err(e) = send_snapshot(id, &mut sink, snapshot).await {
        tracing::warn!(client_id = %id, error = %e, "Failed to send room snapshot");
        if config.hub.leave(id).await.is_err() {
            tracing::debug!(client_id = %id, "Hub already stopped");
        }
        return;
    }

    let writer = tokio::spawn(write_loop(id, outbound_rx, sink));

    let reader = Reader {
        id,
        hub: &config.hub,
        store: config.store.as_ref(),
        own_queue,
    };
    let reason = reader.run(stream).await;
    log_end(id, &reason);

    if config.hub.leave(id).await.is_err() {
        tracing::debug!(client_id = %id, "Hub already stopped");
    }

    if let Err(e) = writer.await {
        tracing::warn!(client_id = %id, error = %e, "Write task failed");
    }

    tracing::info!(client_id = %id, "Session ended");
}

async fn send_snapshot<S>(id: ClientId, sink: &mut S, snapshot: Vec<Message>) -> Result<(), TransportError>
where
    S: Sink<Frame, Error = TransportError> + Unpin,
{
    for message in snapshot {
        match encode(&message) {
            Ok(json) => sink.feed(Frame::Text(json)).await?,
            Err(e) => {
                tracing::warn!(client_id = %id, error = %e, "Failed to encode room snapshot entry");
            }
        }
    }
    sink.flush().await
}

fn log_end(id: ClientId, reason: &EndReason) {
    match reason {
        EndReason::Closed(code) if CloseCode::is_expected_raw(*code) => {
            tracing::info!(client_id = %id, code = ?code, "Client closed connection");
        }
        EndReason::Closed(code) => {
            tracing::warn!(client_id = %id, code = ?code, "Client closed connection unexpectedly");
        }
        EndReason::EndOfStream => {
            tracing::info!(client_id = %id, "Connection ended");
        }
        EndReason::Transport(e) => {
            tracing::warn!(client_id = %id, error = %e, "Transport error");
        }
        EndReason::HubClosed => {
            tracing::warn!(client_id = %id, "Hub stopped while session was active");
        }
    }
}
