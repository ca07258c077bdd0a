//! Message hub
//!
//! Tracks who is connected and routes joins, leaves, private messages,
//! broadcasts and position updates between sessions.

mod control;
mod events;
mod handle;
mod registry;

pub use control::Hub;
pub use events::{BroadcastSend, Member, PositionChange, PrivateSend};
pub use handle::{HubError, HubHandle};
