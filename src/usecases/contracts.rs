use anyhow::Result;
use thiserror::Error;

use crate::domain::{
    connection::ConnectionId, events::AppEvent, message::MessageKind, shell_state::ShellState,
    transcript::Transcript,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Display surface for chat messages.
pub trait Renderer {
    /// Appends one message and brings it into view.
    fn render(&mut self, text: &str, kind: MessageKind);
}

impl Renderer for Transcript {
    fn render(&mut self, text: &str, kind: MessageKind) {
        self.append(text, kind);
    }
}

/// A missing container turns rendering into a no-op.
impl<R: Renderer> Renderer for Option<R> {
    fn render(&mut self, text: &str, kind: MessageKind) {
        match self {
            Some(renderer) => renderer.render(text, kind),
            None => tracing::trace!(
                kind = ?kind,
                len = text.len(),
                "render skipped: no message container"
            ),
        }
    }
}

/// Issues one chat request. The completion arrives later as a transport event.
pub trait RestTransport {
    fn post(&self, text: &str);
}

/// Opens WebSocket connections. Every call opens a new one.
pub trait SocketConnector {
    type Link: SocketLink;

    fn connect(&mut self) -> Self::Link;
}

/// Write half of one open connection.
pub trait SocketLink {
    fn id(&self) -> ConnectionId;
    fn send_text(&self, frame: String) -> Result<(), SocketSendError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocketSendError {
    #[error("connection {0} is no longer running")]
    LinkClosed(ConnectionId),
}
