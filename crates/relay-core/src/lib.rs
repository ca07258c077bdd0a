//! # relay-core
//!
//! Domain layer for the presence relay: client identities, positions, the
//! message sum type routed by the hub, and the persistence port for private
//! messages. This crate has no dependencies on the web framework or database.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, MessageKind, PrivateMessageRecord};
pub use error::StoreError;
pub use traits::{MessageStore, StoreResult};
pub use value_objects::{ClientId, ClientIdParseError, Position};
