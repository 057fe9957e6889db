use anyhow::Result;

use crate::{
    domain::{
        events::{AppEvent, KeyInput},
        shell_state::ShellState,
    },
    infra::config::TransportMode,
};

use super::{
    contracts::{RestTransport, ShellOrchestrator, SocketConnector},
    dispatcher::{DispatchOutcome, Dispatcher},
};

pub const EXPLORE_NOTICE: &str = "Exploring the Nebula universe";

pub struct DefaultShellOrchestrator<R, C>
where
    R: RestTransport,
    C: SocketConnector,
{
    state: ShellState,
    dispatcher: Dispatcher<R, C>,
}

impl<R, C> DefaultShellOrchestrator<R, C>
where
    R: RestTransport,
    C: SocketConnector,
{
    pub fn new(dispatcher: Dispatcher<R, C>) -> Self {
        Self {
            state: ShellState::new(dispatcher.mode().as_label()),
            dispatcher,
        }
    }

    /// Opens the initial connection when the socket transport is configured.
    pub fn start(&mut self) {
        if self.dispatcher.mode() == TransportMode::Websocket {
            self.dispatcher.connect();
            self.sync_connection_state();
        }
    }

    fn submit_input(&mut self) {
        let text = self.state.input().text();
        let outcome = self.dispatcher.send(&text, self.state.transcript_mut());
        tracing::debug!(outcome = ?outcome, "input dispatched");

        if outcome != DispatchOutcome::Ignored {
            self.state.input_mut().clear();
        }
        self.sync_connection_state();
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        if key.key == "enter" {
            self.submit_input();
            return;
        }

        let input = self.state.input_mut();
        match key.key.as_str() {
            "backspace" => input.backspace(),
            "delete" => input.delete(),
            "left" => input.left(),
            "right" => input.right(),
            "home" => input.home(),
            "end" => input.end(),
            other => {
                let mut chars = other.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    if !input.insert(ch) {
                        tracing::debug!("input is full; dropping keystroke");
                    }
                }
            }
        }
    }

    fn sync_connection_state(&mut self) {
        self.state
            .set_connection_state(self.dispatcher.connection_state());
    }
}

impl<R, C> ShellOrchestrator for DefaultShellOrchestrator<R, C>
where
    R: RestTransport,
    C: SocketConnector,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::ExploreRequested => self.state.show_popup(EXPLORE_NOTICE),
            AppEvent::InputKey(key) => {
                // The popup swallows the key that dismisses it.
                if !self.state.dismiss_popup() {
                    self.handle_key(key);
                }
            }
            AppEvent::SendRequested => {
                self.state.dismiss_popup();
                self.submit_input();
            }
            AppEvent::Transport(event) => {
                self.dispatcher
                    .on_transport_event(event, self.state.transcript_mut());
                self.sync_connection_state();
            }
        }

        Ok(())
    }
}
