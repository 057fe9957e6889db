use std::sync::mpsc::Sender;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    domain::{
        connection::ConnectionId,
        events::{SocketEvent, TransportEvent},
    },
    usecases::contracts::{SocketConnector, SocketLink, SocketSendError},
};

const WS_CONNECT_FAILED: &str = "WS_CONNECT_FAILED";
const WS_READ_FAILED: &str = "WS_READ_FAILED";
const WS_WRITE_FAILED: &str = "WS_WRITE_FAILED";
const WS_EVENT_DROPPED: &str = "WS_EVENT_DROPPED";

/// Opens a fresh connection task per `connect()` call.
pub struct WsConnector {
    endpoint: String,
    runtime: Handle,
    events: Sender<TransportEvent>,
    last_id: u64,
}

impl WsConnector {
    pub fn new(endpoint: impl Into<String>, runtime: Handle, events: Sender<TransportEvent>) -> Self {
        Self {
            endpoint: endpoint.into(),
            runtime,
            events,
            last_id: 0,
        }
    }
}

impl SocketConnector for WsConnector {
    type Link = WsLink;

    fn connect(&mut self) -> WsLink {
        self.last_id += 1;
        let id = ConnectionId(self.last_id);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        tracing::info!(connection = %id, endpoint = %self.endpoint, "opening websocket connection");
        self.runtime.spawn(run_connection(
            id,
            self.endpoint.clone(),
            outbound_rx,
            self.events.clone(),
        ));

        WsLink {
            id,
            outbound: outbound_tx,
        }
    }
}

#[derive(Debug)]
pub struct WsLink {
    id: ConnectionId,
    outbound: UnboundedSender<String>,
}

impl SocketLink for WsLink {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send_text(&self, frame: String) -> Result<(), SocketSendError> {
        self.outbound
            .send(frame)
            .map_err(|_| SocketSendError::LinkClosed(self.id))
    }
}

/// Drives one connection until the peer closes it or it fails.
///
/// Dropping the link only stops outbound traffic; inbound events keep flowing
/// until the connection itself ends.
async fn run_connection(
    id: ConnectionId,
    endpoint: String,
    mut outbound: UnboundedReceiver<String>,
    events: Sender<TransportEvent>,
) {
    let emit = |event: SocketEvent| {
        let delivered = events
            .send(TransportEvent::Socket {
                connection: id,
                event,
            })
            .is_ok();
        if !delivered {
            tracing::debug!(code = WS_EVENT_DROPPED, connection = %id, "ui loop is gone");
        }
        delivered
    };

    let stream = match connect_async(endpoint.as_str()).await {
        Ok((stream, response)) => {
            tracing::info!(
                connection = %id,
                status = ?response.status(),
                "websocket connection established"
            );
            stream
        }
        Err(error) => {
            tracing::error!(code = WS_CONNECT_FAILED, connection = %id, error = %error, "websocket connect failed");
            emit(SocketEvent::Errored(error.to_string()));
            return;
        }
    };

    if !emit(SocketEvent::Opened) {
        return;
    }

    let (mut write, mut read) = stream.split();
    let mut outbound_open = true;

    loop {
        tokio::select! {
            frame = outbound.recv(), if outbound_open => match frame {
                Some(frame) => {
                    if let Err(error) = write.send(Message::Text(frame)).await {
                        tracing::error!(code = WS_WRITE_FAILED, connection = %id, error = %error, "websocket send failed");
                        emit(SocketEvent::Errored(error.to_string()));
                        return;
                    }
                }
                None => {
                    tracing::debug!(connection = %id, "websocket link released; reading until close");
                    outbound_open = false;
                }
            },
            inbound = read.next() => {
                let event = match inbound {
                    Some(Ok(Message::Text(text))) => SocketEvent::Message(text),
                    Some(Ok(Message::Binary(bytes))) => {
                        SocketEvent::Message(String::from_utf8_lossy(&bytes).into_owned())
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(connection = %id, frame = ?frame, "websocket closed by server");
                        emit(SocketEvent::Closed);
                        return;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(error)) => {
                        tracing::error!(code = WS_READ_FAILED, connection = %id, error = %error, "websocket read failed");
                        emit(SocketEvent::Errored(error.to_string()));
                        return;
                    }
                    None => {
                        tracing::info!(connection = %id, "websocket stream ended");
                        emit(SocketEvent::Closed);
                        return;
                    }
                };

                if !emit(event) {
                    return;
                }
            }
        }
    }
}
