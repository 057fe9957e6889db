use std::{
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput, TransportEvent},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Merges transport completions with terminal input.
///
/// Pending transport events are always delivered before the terminal is
/// polled, so replies show up even while the user is typing.
pub struct TerminalEventSource {
    transport_events: Receiver<TransportEvent>,
    transport_closed: bool,
}

impl TerminalEventSource {
    pub fn new(transport_events: Receiver<TransportEvent>) -> Self {
        Self {
            transport_events,
            transport_closed: false,
        }
    }

    fn next_transport_event(&mut self) -> Option<TransportEvent> {
        if self.transport_closed {
            return None;
        }

        match self.transport_events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("transport event channel closed");
                self.transport_closed = true;
                None
            }
        }
    }
}

impl AppEventSource for TerminalEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.next_transport_event() {
            return Ok(Some(AppEvent::Transport(event)));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            Event::Resize(..) => Ok(Some(AppEvent::Tick)),
            _ => Ok(None),
        }
    }
}

/// Translates one terminal key press into an app event.
fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Some(AppEvent::QuitRequested),
        KeyCode::Char('c') if ctrl => Some(AppEvent::QuitRequested),
        KeyCode::Char('s') if ctrl => Some(AppEvent::SendRequested),
        KeyCode::Char('e') if ctrl => Some(AppEvent::ExploreRequested),
        // Shift+Enter must not submit.
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => None,
        KeyCode::Enter => Some(named("enter")),
        KeyCode::Backspace => Some(named("backspace")),
        KeyCode::Delete => Some(named("delete")),
        KeyCode::Left => Some(named("left")),
        KeyCode::Right => Some(named("right")),
        KeyCode::Home => Some(named("home")),
        KeyCode::End => Some(named("end")),
        KeyCode::Char(ch) => Some(AppEvent::InputKey(KeyInput::new(ch.to_string(), ctrl))),
        _ => None,
    }
}

fn named(key: &str) -> AppEvent {
    AppEvent::InputKey(KeyInput::new(key, false))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
