//! Relay protocol definitions
//!
//! Defines the JSON frame format and the close codes the relay understands.

mod close_codes;
mod wire;

pub use close_codes::CloseCode;
pub use wire::{decode_request, encode, ClientRequest, DecodeError, WireMessage, WireType};
