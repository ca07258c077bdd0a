//! Message store implementations
//!
//! `PgMessageStore` is what the gateway runs with; `MemoryMessageStore` keeps
//! records in process and can be told to fail, which is what the session and
//! end-to-end tests drive.

mod error;
mod memory;
mod private_message;

pub use memory::MemoryMessageStore;
pub use private_message::PgMessageStore;
