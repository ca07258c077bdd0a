//! axum WebSocket adapter

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures_util::{future, Sink, SinkExt, Stream, StreamExt};

use super::{Frame, TransportError};

/// Split an upgraded socket into a frame sink and a frame stream
///
/// Ping and pong frames never reach the session; axum answers pings itself.
pub fn split_socket(
    socket: WebSocket,
) -> (
    impl Sink<Frame, Error = TransportError> + Unpin + Send + 'static,
    impl Stream<Item = Result<Frame, TransportError>> + Unpin + Send + 'static,
) {
    let (sink, stream) = socket.split();

    let sink = sink
        .sink_map_err(TransportError::from)
        .with(|frame: Frame| future::ready(Ok::<_, TransportError>(into_message(frame))));

    let stream = stream.filter_map(|result| {
        future::ready(match result {
            Ok(message) => from_message(message).map(Ok),
            Err(e) => Some(Err(TransportError::from(e))),
        })
    });

    (sink, stream)
}

fn into_message(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text),
        Frame::Binary(bytes) => Message::Binary(bytes),
        Frame::Close(code) => Message::Close(code.map(|code| CloseFrame {
            code,
            reason: "".into(),
        })),
    }
}

fn from_message(message: Message) -> Option<Frame> {
    match message {
        Message::Text(text) => Some(Frame::Text(text)),
        Message::Binary(bytes) => Some(Frame::Binary(bytes)),
        Message::Close(close) => Some(Frame::Close(close.map(|frame| frame.code))),
        Message::Ping(_) | Message::Pong(_) => None,
    }
}
