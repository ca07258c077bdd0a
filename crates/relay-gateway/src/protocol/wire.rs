//! Wire message format
//!
//! Every frame is a flat JSON object:
//!
//! ```json
//! {"type": "private", "to": "<id>", "from": "<id>", "msg": "hi", "position": {"pagex": 1, "pagey": 2}}
//! ```
//!
//! Only `type` is always present; the rest are omitted when empty. Outbound
//! frames are produced from the domain [`Message`]; inbound frames are decoded
//! into a [`ClientRequest`], the small set of things a client may ask for.

use relay_core::{ClientId, Message, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `type` field of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    Join,
    Leave,
    Broadcast,
    Private,
    Move,
    Error,
    /// Anything this relay does not know about
    #[serde(other)]
    Unknown,
}

impl WireType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Broadcast => "broadcast",
            Self::Private => "private",
            Self::Move => "move",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JSON envelope exactly as it travels over the socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    #[serde(rename = "type")]
    pub kind: WireType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ClientId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ClientId>,

    #[serde(rename = "msg", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl WireMessage {
    fn bare(kind: WireType) -> Self {
        Self {
            kind,
            to: None,
            from: None,
            text: None,
            position: None,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        match message {
            Message::Join { id, position } => Self {
                to: Some(*id),
                position: Some(*position),
                ..Self::bare(WireType::Join)
            },
            Message::Leave { from } => Self {
                from: Some(*from),
                ..Self::bare(WireType::Leave)
            },
            Message::Broadcast { from, text } => Self {
                from: Some(*from),
                text: Some(text.clone()),
                ..Self::bare(WireType::Broadcast)
            },
            Message::Private { to, from, text } => Self {
                to: Some(*to),
                from: Some(*from),
                text: Some(text.clone()),
                ..Self::bare(WireType::Private)
            },
            Message::PositionUpdate { from, position } => Self {
                from: Some(*from),
                position: Some(*position),
                ..Self::bare(WireType::Move)
            },
            Message::Error { to, text } => Self {
                to: *to,
                text: Some(text.clone()),
                ..Self::bare(WireType::Error)
            },
        }
    }
}

/// Encode a domain message as a text frame payload
pub fn encode(message: &Message) -> Result<String, serde_json::Error> {
    WireMessage::from(message).to_json()
}

/// Something a client asked the relay to do
///
/// The sender is never taken from the frame; the session stamps its own id.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    /// Deliver text to one client
    Private { to: ClientId, text: String },
    /// Deliver text to every client
    Broadcast { text: String },
    /// The sender's cursor moved
    Move { position: Position },
    /// A well-formed frame of a type clients do not send
    Ignored(WireType),
}

/// Why an inbound frame was discarded
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed JSON envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} frame is missing `{field}`")]
    MissingField {
        kind: WireType,
        field: &'static str,
    },
}

/// Decode an inbound text frame
pub fn decode_request(json: &str) -> Result<ClientRequest, DecodeError> {
    let wire = WireMessage::from_json(json)?;

    match wire.kind {
        WireType::Private => {
            let to = wire.to.ok_or(DecodeError::MissingField {
                kind: wire.kind,
                field: "to",
            })?;
            Ok(ClientRequest::Private {
                to,
                text: wire.text.unwrap_or_default(),
            })
        }
        WireType::Broadcast => Ok(ClientRequest::Broadcast {
            text: wire.text.unwrap_or_default(),
        }),
        WireType::Move => {
            let position = wire.position.ok_or(DecodeError::MissingField {
                kind: wire.kind,
                field: "position",
            })?;
            Ok(ClientRequest::Move { position })
        }
        other => Ok(ClientRequest::Ignored(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value(message: &Message) -> Value {
        serde_json::from_str(&encode(message).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_join_ack() {
        let id = ClientId::generate();
        let value = to_value(&Message::Join {
            id,
            position: Position::new(10.0, 20.0),
        });

        assert_eq!(
            value,
            json!({
                "type": "join",
                "to": id.to_string(),
                "position": {"pagex": 10.0, "pagey": 20.0}
            })
        );
    }

    #[test]
    fn test_encode_position_update_as_move() {
        let from = ClientId::generate();
        let value = to_value(&Message::PositionUpdate {
            from,
            position: Position::new(1.0, 1.0),
        });

        assert_eq!(value["type"], "move");
        assert_eq!(value["from"], from.to_string());
        assert!(value.get("to").is_none());
        assert!(value.get("msg").is_none());
    }

    #[test]
    fn test_encode_leave_and_error() {
        let from = ClientId::generate();
        assert_eq!(
            to_value(&Message::Leave { from }),
            json!({"type": "leave", "from": from.to_string()})
        );

        let to = ClientId::generate();
        assert_eq!(
            to_value(&Message::delivery_failed(to)),
            json!({"type": "error", "to": to.to_string(), "msg": "failed to send your message"})
        );
    }

    #[test]
    fn test_decode_private() {
        let to = ClientId::generate();
        let spoofed = ClientId::generate();
        // `from` is dropped; the session stamps its own id
        let frame = json!({"type": "private", "to": to.to_string(), "from": spoofed.to_string(), "msg": "hey"});
        assert_eq!(
            decode_request(&frame.to_string()).unwrap(),
            ClientRequest::Private {
                to,
                text: "hey".to_string()
            }
        );
    }

    #[test]
    fn test_decode_private_requires_recipient() {
        let err = decode_request(r#"{"type":"private","msg":"hey"}"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingField {
                kind: WireType::Private,
                field: "to"
            }
        ));
    }

    #[test]
    fn test_decode_move() {
        let own = ClientId::generate();
        // Browsers send their own id in `to`; it is accepted and ignored
        let frame = json!({"type": "move", "to": own.to_string(), "position": {"pagex": 5, "pagey": 6.5}});
        assert_eq!(
            decode_request(&frame.to_string()).unwrap(),
            ClientRequest::Move {
                position: Position::new(5.0, 6.5)
            }
        );

        assert!(matches!(
            decode_request(r#"{"type":"move"}"#),
            Err(DecodeError::MissingField { field: "position", .. })
        ));
    }

    #[test]
    fn test_decode_broadcast_defaults_text() {
        assert_eq!(
            decode_request(r#"{"type":"broadcast"}"#).unwrap(),
            ClientRequest::Broadcast {
                text: String::new()
            }
        );
    }

    #[test]
    fn test_decode_ignores_server_and_unknown_types() {
        assert_eq!(
            decode_request(r#"{"type":"join"}"#).unwrap(),
            ClientRequest::Ignored(WireType::Join)
        );
        assert_eq!(
            decode_request(r#"{"type":"typing"}"#).unwrap(),
            ClientRequest::Ignored(WireType::Unknown)
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_request("not json"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_request(r#"{"msg":"no type"}"#), Err(DecodeError::Json(_))));
        assert!(matches!(
            decode_request(r#"{"type":"private","to":"nope"}"#),
            Err(DecodeError::Json(_))
        ));
    }
}
