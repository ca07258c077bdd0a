//! Transport abstraction
//!
//! Sessions talk to a [`Frame`] stream and a [`Frame`] sink instead of a
//! concrete socket, so the read and write loops run unchanged over in-memory
//! channels in tests.

mod frame;
mod websocket;

pub use frame::{Frame, TransportError};
pub use websocket::split_socket;
