use super::connection::ConnectionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    /// The send trigger was pressed.
    SendRequested,
    /// The explore trigger was pressed.
    ExploreRequested,
    Transport(TransportEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// Asynchronous completions delivered back to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Rest(RestOutcome),
    Socket {
        connection: ConnectionId,
        event: SocketEvent,
    },
}

/// Result of one REST exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestOutcome {
    /// 2xx response; holds the text to display.
    Reply(String),
    /// Non-success status. The body is kept for logging only.
    Status { code: u16, body: String },
    /// The request never produced a response.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Opened,
    Message(String),
    Closed,
    Errored(String),
}
