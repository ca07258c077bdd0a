//! Client ID - opaque identifier assigned to each connection
//!
//! Backed by a random v4 UUID and rendered in its hyphenated string form on
//! the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh random ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, ClientIdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ClientIdParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing a ClientId from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientIdParseError {
    #[error("invalid client id: {0:?}")]
    InvalidFormat(String),
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for ClientId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ClientId {
    type Err = ClientIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientId::parse(s)
    }
}

impl Serialize for ClientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ClientId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = ClientId::generate();
        let b = ClientId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36);
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = ClientId::generate();
        let parsed: ClientId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ClientId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err, ClientIdParseError::InvalidFormat("not-a-uuid".to_string()));
    }

    #[test]
    fn test_serde_as_string() {
        let id = ClientId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: ClientId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ClientId>("42").is_err());
    }
}
