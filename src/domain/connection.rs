//! WebSocket connection lifecycle.

use std::fmt;

use super::events::SocketEvent;

/// Identifies one connection attempt. Each `connect()` gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionState {
    /// Next state after a transport event. Inbound messages never move the state.
    pub fn apply(self, event: &SocketEvent) -> Self {
        match event {
            SocketEvent::Opened => Self::Open,
            SocketEvent::Closed => Self::Closed,
            SocketEvent::Errored(_) => Self::Errored,
            SocketEvent::Message(_) => self,
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "errored",
        }
    }
}
