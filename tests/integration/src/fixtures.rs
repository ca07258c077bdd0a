//! Frame builders and response shapes

use relay_core::ClientId;
use serde::Deserialize;
use serde_json::{json, Value};

/// A private message addressed to `to`
pub fn private_frame(to: ClientId, text: &str) -> Value {
    json!({"type": "private", "to": to.to_string(), "msg": text})
}

/// A cursor move
pub fn move_frame(x: f64, y: f64) -> Value {
    json!({"type": "move", "position": {"pagex": x, "pagey": y}})
}

/// Text for everyone
pub fn broadcast_frame(text: &str) -> Value {
    json!({"type": "broadcast", "msg": text})
}

/// Body of `GET /health`
#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub online: usize,
}
