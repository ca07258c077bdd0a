//! Session write path

use futures_util::{Sink, SinkExt};
use relay_core::{ClientId, Message};
use tokio::sync::mpsc;

use crate::protocol::{encode, CloseCode};
use crate::transport::{Frame, TransportError};

/// Drain the outbound queue onto the transport
///
/// Ends with a normal close frame once the hub drops the queue. A failed
/// write closes the sink and returns; dropping the queue then lets the hub
/// notice on its next delivery.
pub(super) async fn write_loop<S>(id: ClientId, mut outbound: mpsc::Receiver<Message>, mut sink: S)
where
    S: Sink<Frame, Error = TransportError> + Unpin,
{
    while let Some(message) = outbound.recv().await {
        let json = match encode(&message) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(client_id = %id, kind = %message.kind(), error = %e, "Failed to encode message");
                continue;
            }
        };

        if let Err(e) = sink.send(Frame::Text(json)).await {
            tracing::debug!(client_id = %id, error = %e, "Write failed, closing transport");
            let _ = sink.close().await;
            return;
        }
    }

    tracing::debug!(client_id = %id, "Outbound queue closed");

    let close = Frame::Close(Some(CloseCode::Normal.as_u16()));
    if sink.send(close).await.is_ok() {
        let _ = sink.close().await;
    }
}
