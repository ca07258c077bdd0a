//! WebSocket close codes
//!
//! The subset of RFC 6455 codes the relay sends or inspects when a peer hangs up.

/// Close codes seen on relay connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CloseCode {
    /// Normal closure
    Normal = 1000,
    /// Endpoint is going away (tab closed, server shutdown)
    GoingAway = 1001,
    /// Connection dropped without a close frame (never sent on the wire)
    Abnormal = 1006,
}

impl CloseCode {
    /// Create a `CloseCode` from a raw u16 value
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1000 => Some(Self::Normal),
            1001 => Some(Self::GoingAway),
            1006 => Some(Self::Abnormal),
            _ => None,
        }
    }

    /// Get the raw u16 value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether a peer closing with this code is routine and not worth a warning
    #[must_use]
    pub const fn is_expected(self) -> bool {
        matches!(self, Self::Normal | Self::GoingAway | Self::Abnormal)
    }

    /// Classify a raw close code from the peer; a missing code counts as expected
    #[must_use]
    pub fn is_expected_raw(code: Option<u16>) -> bool {
        code.is_none_or(|raw| Self::from_u16(raw).is_some_and(Self::is_expected))
    }
}
