//! # relay-gateway
//!
//! WebSocket presence relay: a single hub task routes joins, leaves, private
//! messages, broadcasts and cursor positions between client sessions.

pub mod hub;
pub mod protocol;
pub mod server;
pub mod session;
pub mod transport;

pub use server::{create_app, create_gateway_state, create_router, run, run_server, GatewayState};
