//! Value objects - immutable types that represent domain concepts

mod client_id;
mod position;

pub use client_id::{ClientId, ClientIdParseError};
pub use position::Position;
