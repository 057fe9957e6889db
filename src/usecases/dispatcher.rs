//! Outgoing message dispatch and transport event handling.
//!
//! The dispatcher owns the current WebSocket connection and decides, per
//! message, which transport carries it. Completions from either transport come
//! back through [`Dispatcher::on_transport_event`] on the UI thread.

use crate::{
    domain::{
        connection::{ConnectionId, ConnectionState},
        events::{RestOutcome, SocketEvent, TransportEvent},
        message::MessageKind,
    },
    infra::config::{TransportConfig, TransportMode},
    transport::wire::outbound_frame,
};

use super::contracts::{Renderer, RestTransport, SocketConnector, SocketLink};

pub const NOTICE_SOCKET_OPENED: &str = "WebSocket connection established.";
pub const NOTICE_SOCKET_CLOSED: &str = "WebSocket connection closed.";
pub const NOTICE_SOCKET_ERROR: &str = "Server connection error (WebSocket).";
pub const NOTICE_SOCKET_NOT_CONNECTED: &str = "WebSocket is not connected. Trying to reconnect...";
pub const NOTICE_REST_FAILED: &str = "Server connection error (request failed). See logs.";

const DISPATCH_SOCKET_WRITE_FAILED: &str = "DISPATCH_SOCKET_WRITE_FAILED";

pub fn rest_status_notice(code: u16) -> String {
    format!("Server connection error. Status: {code}")
}

/// Which path a `send` call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank input; nothing rendered, nothing sent.
    Ignored,
    Socket,
    Rest,
    /// Socket was not open: reconnect started and the message also went over REST.
    RestFallback,
    /// Socket was not open: reconnect started, REST fallback disabled.
    Reconnecting,
}

struct Connection<L> {
    link: L,
    state: ConnectionState,
}

pub struct Dispatcher<R, C>
where
    R: RestTransport,
    C: SocketConnector,
{
    mode: TransportMode,
    rest_fallback: bool,
    rest: R,
    connector: C,
    current: Option<Connection<C::Link>>,
}

impl<R, C> Dispatcher<R, C>
where
    R: RestTransport,
    C: SocketConnector,
{
    pub fn new(config: &TransportConfig, rest: R, connector: C) -> Self {
        Self {
            mode: config.mode,
            rest_fallback: config.rest_fallback,
            rest,
            connector,
            current: None,
        }
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// State of the current connection, if one was ever opened.
    pub fn connection_state(&self) -> Option<ConnectionState> {
        self.current.as_ref().map(|connection| connection.state)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn current_connection_id(&self) -> Option<ConnectionId> {
        self.current.as_ref().map(|connection| connection.link.id())
    }

    #[cfg(test)]
    pub fn rest_transport(&self) -> &R {
        &self.rest
    }

    /// Opens a new connection and makes it current.
    ///
    /// A previous connection is not closed; its events are still rendered.
    pub fn connect(&mut self) {
        let link = self.connector.connect();
        tracing::debug!(connection = %link.id(), "dispatcher switched to new connection");
        self.current = Some(Connection {
            link,
            state: ConnectionState::Connecting,
        });
    }

    pub fn send(&mut self, text: &str, renderer: &mut dyn Renderer) -> DispatchOutcome {
        if text.trim().is_empty() {
            return DispatchOutcome::Ignored;
        }

        renderer.render(text, MessageKind::User);

        match self.mode {
            TransportMode::Rest => {
                self.rest.post(text);
                DispatchOutcome::Rest
            }
            TransportMode::Websocket => {
                if self.try_send_over_socket(text) {
                    return DispatchOutcome::Socket;
                }

                renderer.render(NOTICE_SOCKET_NOT_CONNECTED, MessageKind::System);
                self.connect();

                if self.rest_fallback {
                    self.rest.post(text);
                    DispatchOutcome::RestFallback
                } else {
                    DispatchOutcome::Reconnecting
                }
            }
        }
    }

    pub fn on_transport_event(&mut self, event: TransportEvent, renderer: &mut dyn Renderer) {
        match event {
            TransportEvent::Rest(outcome) => render_rest_outcome(outcome, renderer),
            TransportEvent::Socket { connection, event } => {
                self.track_socket_event(connection, &event);
                render_socket_event(event, renderer);
            }
        }
    }

    fn try_send_over_socket(&mut self, text: &str) -> bool {
        let Some(connection) = self.current.as_mut() else {
            return false;
        };

        if !connection.state.is_open() {
            return false;
        }

        match connection.link.send_text(outbound_frame(text)) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    code = DISPATCH_SOCKET_WRITE_FAILED,
                    error = %error,
                    "open connection rejected frame"
                );
                connection.state = ConnectionState::Errored;
                false
            }
        }
    }

    fn track_socket_event(&mut self, id: ConnectionId, event: &SocketEvent) {
        match self.current.as_mut() {
            Some(connection) if connection.link.id() == id => {
                let next = connection.state.apply(event);
                if next != connection.state {
                    tracing::info!(
                        connection = %id,
                        from = connection.state.as_label(),
                        to = next.as_label(),
                        "connection state changed"
                    );
                }
                connection.state = next;
            }
            _ => tracing::debug!(connection = %id, "event from superseded connection"),
        }
    }
}

fn render_rest_outcome(outcome: RestOutcome, renderer: &mut dyn Renderer) {
    match outcome {
        RestOutcome::Reply(text) => renderer.render(&text, MessageKind::Bot),
        RestOutcome::Status { code, .. } => {
            renderer.render(&rest_status_notice(code), MessageKind::System)
        }
        RestOutcome::Failed(_) => renderer.render(NOTICE_REST_FAILED, MessageKind::System),
    }
}

fn render_socket_event(event: SocketEvent, renderer: &mut dyn Renderer) {
    match event {
        SocketEvent::Opened => renderer.render(NOTICE_SOCKET_OPENED, MessageKind::System),
        SocketEvent::Message(text) => renderer.render(&text, MessageKind::Bot),
        SocketEvent::Closed => renderer.render(NOTICE_SOCKET_CLOSED, MessageKind::System),
        SocketEvent::Errored(_) => renderer.render(NOTICE_SOCKET_ERROR, MessageKind::System),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        domain::transcript::Transcript,
        test_support::{RecordingConnector, RecordingRest},
    };

    fn config(mode: TransportMode, rest_fallback: bool) -> TransportConfig {
        TransportConfig {
            mode,
            rest_fallback,
            ..TransportConfig::default()
        }
    }

    fn dispatcher(
        mode: TransportMode,
        rest_fallback: bool,
    ) -> Dispatcher<RecordingRest, RecordingConnector> {
        Dispatcher::new(
            &config(mode, rest_fallback),
            RecordingRest::default(),
            RecordingConnector::default(),
        )
    }

    fn open_current(dispatcher: &mut Dispatcher<RecordingRest, RecordingConnector>) {
        dispatcher.connect();
        let id = dispatcher.current_connection_id().expect("connection exists");
        dispatcher.on_transport_event(
            TransportEvent::Socket {
                connection: id,
                event: SocketEvent::Opened,
            },
            &mut Transcript::default(),
        );
    }

    fn kinds_and_texts(transcript: &Transcript) -> Vec<(MessageKind, String)> {
        transcript
            .messages()
            .iter()
            .map(|m| (m.kind, m.text.clone()))
            .collect()
    }

    #[test]
    fn blank_text_renders_nothing_and_sends_nothing() {
        for mode in [TransportMode::Rest, TransportMode::Websocket] {
            let mut dispatcher = dispatcher(mode, true);
            let mut transcript = Transcript::default();

            for text in ["", "   ", "\t\n "] {
                assert_eq!(
                    dispatcher.send(text, &mut transcript),
                    DispatchOutcome::Ignored
                );
            }

            assert!(transcript.is_empty());
            assert!(dispatcher.rest.posted().is_empty());
            assert_eq!(dispatcher.connector.connect_count(), 0);
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Render(MessageKind, String),
        Post(String),
    }

    type CallLog = Rc<RefCell<Vec<Call>>>;

    struct LoggedRest(CallLog);

    impl RestTransport for LoggedRest {
        fn post(&self, text: &str) {
            self.0.borrow_mut().push(Call::Post(text.to_owned()));
        }
    }

    struct LoggedRenderer(CallLog);

    impl Renderer for LoggedRenderer {
        fn render(&mut self, text: &str, kind: MessageKind) {
            self.0.borrow_mut().push(Call::Render(kind, text.to_owned()));
        }
    }

    fn calls_for_send(mode: TransportMode, text: &str) -> Vec<Call> {
        let log = CallLog::default();
        let mut dispatcher = Dispatcher::new(
            &config(mode, true),
            LoggedRest(Rc::clone(&log)),
            RecordingConnector::default(),
        );

        dispatcher.send(text, &mut LoggedRenderer(Rc::clone(&log)));

        log.take()
    }

    #[test]
    fn user_message_is_rendered_before_the_rest_call() {
        assert_eq!(
            calls_for_send(TransportMode::Rest, "hello"),
            [
                Call::Render(MessageKind::User, "hello".to_owned()),
                Call::Post("hello".to_owned()),
            ]
        );
    }

    #[test]
    fn user_message_is_rendered_before_the_fallback_call() {
        assert_eq!(
            calls_for_send(TransportMode::Websocket, "hello"),
            [
                Call::Render(MessageKind::User, "hello".to_owned()),
                Call::Render(MessageKind::System, NOTICE_SOCKET_NOT_CONNECTED.to_owned()),
                Call::Post("hello".to_owned()),
            ]
        );
    }

    #[test]
    fn text_is_sent_untrimmed() {
        let mut dispatcher = dispatcher(TransportMode::Rest, true);
        let mut transcript = Transcript::default();

        dispatcher.send("  hi  ", &mut transcript);

        assert_eq!(dispatcher.rest.posted(), ["  hi  "]);
        assert_eq!(transcript.messages()[0].text, "  hi  ");
    }

    #[test]
    fn rest_mode_never_touches_the_socket() {
        let mut dispatcher = dispatcher(TransportMode::Rest, true);

        let outcome = dispatcher.send("hello", &mut Transcript::default());

        assert_eq!(outcome, DispatchOutcome::Rest);
        assert_eq!(dispatcher.connector.connect_count(), 0);
    }

    #[test]
    fn rest_reply_renders_one_bot_message() {
        let mut dispatcher = dispatcher(TransportMode::Rest, true);
        let mut transcript = Transcript::default();

        dispatcher.on_transport_event(
            TransportEvent::Rest(RestOutcome::Reply("hi".to_owned())),
            &mut transcript,
        );

        assert_eq!(
            kinds_and_texts(&transcript),
            [(MessageKind::Bot, "hi".to_owned())]
        );
    }

    #[test]
    fn rest_status_renders_system_notice_with_code_only() {
        let mut dispatcher = dispatcher(TransportMode::Rest, true);
        let mut transcript = Transcript::default();

        dispatcher.on_transport_event(
            TransportEvent::Rest(RestOutcome::Status {
                code: 500,
                body: "secret stack trace".to_owned(),
            }),
            &mut transcript,
        );

        assert_eq!(transcript.count_of(MessageKind::Bot), 0);
        assert_eq!(transcript.count_of(MessageKind::System), 1);
        let notice = &transcript.messages()[0].text;
        assert!(notice.contains("500"));
        assert!(!notice.contains("secret"));
    }

    #[test]
    fn rest_failure_renders_system_notice() {
        let mut dispatcher = dispatcher(TransportMode::Rest, true);
        let mut transcript = Transcript::default();

        dispatcher.on_transport_event(
            TransportEvent::Rest(RestOutcome::Failed("connection refused".to_owned())),
            &mut transcript,
        );

        assert_eq!(
            kinds_and_texts(&transcript),
            [(MessageKind::System, NOTICE_REST_FAILED.to_owned())]
        );
    }

    #[test]
    fn open_socket_carries_exactly_one_frame_and_no_rest_call() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        open_current(&mut dispatcher);
        let mut transcript = Transcript::default();

        let outcome = dispatcher.send("hello", &mut transcript);

        assert_eq!(outcome, DispatchOutcome::Socket);
        assert_eq!(dispatcher.connector.frames(), [r#"{"message":"hello"}"#]);
        assert!(dispatcher.rest.posted().is_empty());
        assert_eq!(transcript.count_of(MessageKind::System), 0);
    }

    #[test]
    fn closed_socket_notices_reconnects_and_falls_back_to_rest() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        let mut transcript = Transcript::default();

        let outcome = dispatcher.send("hello", &mut transcript);

        assert_eq!(outcome, DispatchOutcome::RestFallback);
        assert_eq!(
            kinds_and_texts(&transcript),
            [
                (MessageKind::User, "hello".to_owned()),
                (MessageKind::System, NOTICE_SOCKET_NOT_CONNECTED.to_owned()),
            ]
        );
        assert_eq!(dispatcher.rest.posted(), ["hello"]);
        assert_eq!(dispatcher.connector.connect_count(), 1);
        assert_eq!(
            dispatcher.connection_state(),
            Some(ConnectionState::Connecting)
        );
    }

    #[test]
    fn connecting_socket_is_not_written_to() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        dispatcher.connect();

        let outcome = dispatcher.send("hello", &mut Transcript::default());

        assert_eq!(outcome, DispatchOutcome::RestFallback);
        assert!(dispatcher.connector.frames().is_empty());
        assert_eq!(dispatcher.connector.connect_count(), 2);
    }

    #[test]
    fn disabled_fallback_only_reconnects() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, false);
        let mut transcript = Transcript::default();

        let outcome = dispatcher.send("hello", &mut transcript);

        assert_eq!(outcome, DispatchOutcome::Reconnecting);
        assert!(dispatcher.rest.posted().is_empty());
        assert_eq!(dispatcher.connector.connect_count(), 1);
        assert_eq!(transcript.count_of(MessageKind::System), 1);
    }

    #[test]
    fn rejected_frame_marks_connection_errored_and_falls_back() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        open_current(&mut dispatcher);
        dispatcher.connector.fail_sends();

        let outcome = dispatcher.send("hello", &mut Transcript::default());

        assert_eq!(outcome, DispatchOutcome::RestFallback);
        assert_eq!(dispatcher.rest.posted(), ["hello"]);
        assert_eq!(dispatcher.connector.connect_count(), 2);
    }

    #[test]
    fn socket_lifecycle_renders_notices_and_tracks_state() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        dispatcher.connect();
        let id = dispatcher.current_connection_id().expect("connection exists");
        let mut transcript = Transcript::default();

        for event in [
            SocketEvent::Opened,
            SocketEvent::Message("{\"raw\": true}".to_owned()),
            SocketEvent::Closed,
        ] {
            dispatcher.on_transport_event(
                TransportEvent::Socket {
                    connection: id,
                    event,
                },
                &mut transcript,
            );
        }

        assert_eq!(
            kinds_and_texts(&transcript),
            [
                (MessageKind::System, NOTICE_SOCKET_OPENED.to_owned()),
                (MessageKind::Bot, "{\"raw\": true}".to_owned()),
                (MessageKind::System, NOTICE_SOCKET_CLOSED.to_owned()),
            ]
        );
        assert_eq!(dispatcher.connection_state(), Some(ConnectionState::Closed));
    }

    #[test]
    fn socket_error_renders_notice_and_marks_errored() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        dispatcher.connect();
        let id = dispatcher.current_connection_id().expect("connection exists");
        let mut transcript = Transcript::default();

        dispatcher.on_transport_event(
            TransportEvent::Socket {
                connection: id,
                event: SocketEvent::Errored("refused".to_owned()),
            },
            &mut transcript,
        );

        assert_eq!(
            kinds_and_texts(&transcript),
            [(MessageKind::System, NOTICE_SOCKET_ERROR.to_owned())]
        );
        assert_eq!(dispatcher.connection_state(), Some(ConnectionState::Errored));
        assert_eq!(dispatcher.connector.connect_count(), 1);
    }

    #[test]
    fn superseded_connection_still_renders_but_keeps_current_state() {
        let mut dispatcher = dispatcher(TransportMode::Websocket, true);
        dispatcher.connect();
        let old = dispatcher.current_connection_id().expect("first connection");
        dispatcher.connect();
        let mut transcript = Transcript::default();

        dispatcher.on_transport_event(
            TransportEvent::Socket {
                connection: old,
                event: SocketEvent::Opened,
            },
            &mut transcript,
        );

        assert_eq!(transcript.count_of(MessageKind::System), 1);
        assert_eq!(
            dispatcher.connection_state(),
            Some(ConnectionState::Connecting)
        );
    }
}
