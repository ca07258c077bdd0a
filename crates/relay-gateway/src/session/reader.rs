//! Session read path

use futures_util::{Stream, StreamExt};
use relay_core::{ClientId, Message, MessageStore, PrivateMessageRecord};
use tokio::sync::mpsc::WeakSender;

use crate::hub::{BroadcastSend, HubError, HubHandle, PositionChange, PrivateSend};
use crate::protocol::{decode_request, ClientRequest};
use crate::transport::{Frame, TransportError};

/// Why the read loop stopped
#[derive(Debug)]
pub(super) enum EndReason {
    /// The peer sent a close frame
    Closed(Option<u16>),
    /// The stream ended without a close frame
    EndOfStream,
    Transport(TransportError),
    HubClosed,
}

pub(super) struct Reader<'a> {
    pub id: ClientId,
    pub hub: &'a HubHandle,
    pub store: &'a dyn MessageStore,
    /// The session's own outbound queue, for replies that skip the hub
    pub own_queue: WeakSender<Message>,
}

impl Reader<'_> {
    pub async fn run<R>(&self, mut stream: R) -> EndReason
    where
        R: Stream<Item = Result<Frame, TransportError>> + Unpin,
    {
        while let Some(frame) = stream.next().await {
            let text = match frame {
                Ok(Frame::Text(text)) => text,
                Ok(Frame::Binary(bytes)) => {
                    tracing::debug!(client_id = %self.id, len = bytes.len(), "Binary frame discarded");
                    continue;
                }
                Ok(Frame::Close(code)) => return EndReason::Closed(code),
                Err(e) => return EndReason::Transport(e),
            };

            let request = match decode_request(&text) {
                Ok(request) => request,
                Err(e) => {
                    tracing::debug!(client_id = %self.id, error = %e, "Malformed frame discarded");
                    continue;
                }
            };

            if self.handle(request).await.is_err() {
                return EndReason::HubClosed;
            }
        }

        EndReason::EndOfStream
    }

    async fn handle(&self, request: ClientRequest) -> Result<(), HubError> {
        match request {
            ClientRequest::Private { to, text } => self.send_private(to, text).await,
            ClientRequest::Broadcast { text } => {
                self.hub
                    .broadcast(BroadcastSend {
                        from: self.id,
                        text,
                    })
                    .await
            }
            ClientRequest::Move { position } => {
                self.hub
                    .update_position(PositionChange {
                        from: self.id,
                        position,
                    })
                    .await
            }
            ClientRequest::Ignored(kind) => {
                tracing::trace!(client_id = %self.id, kind = %kind, "Ignoring client frame");
                Ok(())
            }
        }
    }

    /// Persist first; only a stored message is routed
    async fn send_private(&self, to: ClientId, text: String) -> Result<(), HubError> {
        let record = PrivateMessageRecord::new(to, self.id, text);

        if let Err(e) = self.store.record(&record).await {
            tracing::warn!(
                client_id = %self.id,
                to = %to,
                error = %e,
                code = e.code(),
                "Failed to persist private message"
            );
            self.reply(Message::delivery_failed(to));
            return Ok(());
        }

        self.hub
            .send_private(PrivateSend {
                to: record.to,
                from: record.from,
                text: record.text,
            })
            .await
    }

    fn reply(&self, message: Message) {
        let Some(queue) = self.own_queue.upgrade() else {
            tracing::debug!(client_id = %self.id, "Reply dropped, session already left");
            return;
        };

        if queue.try_send(message).is_err() {
            tracing::debug!(client_id = %self.id, "Reply dropped, outbound queue unavailable");
        }
    }
}
