//! Domain entities - what the hub routes and what gets persisted

mod message;
mod private_record;

pub use message::{Message, MessageKind};
pub use private_record::PrivateMessageRecord;
