use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    domain::connection::ConnectionId,
    usecases::contracts::{RestTransport, SocketConnector, SocketLink, SocketSendError},
};

/// Captures every REST post instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingRest {
    posted: RefCell<Vec<String>>,
}

impl RecordingRest {
    pub fn posted(&self) -> Vec<String> {
        self.posted.borrow().clone()
    }
}

impl RestTransport for RecordingRest {
    fn post(&self, text: &str) {
        self.posted.borrow_mut().push(text.to_owned());
    }
}

#[derive(Debug, Default)]
struct SocketLog {
    frames: RefCell<Vec<String>>,
    reject_frames: Cell<bool>,
}

/// Hands out links that record outbound frames in a log shared with the connector.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    log: Rc<SocketLog>,
    connects: u64,
}

impl RecordingConnector {
    pub fn connect_count(&self) -> u64 {
        self.connects
    }

    pub fn frames(&self) -> Vec<String> {
        self.log.frames.borrow().clone()
    }

    /// Makes every link reject frames from now on.
    pub fn fail_sends(&self) {
        self.log.reject_frames.set(true);
    }
}

impl SocketConnector for RecordingConnector {
    type Link = RecordingLink;

    fn connect(&mut self) -> RecordingLink {
        self.connects += 1;
        RecordingLink {
            id: ConnectionId(self.connects),
            log: Rc::clone(&self.log),
        }
    }
}

#[derive(Debug)]
pub struct RecordingLink {
    id: ConnectionId,
    log: Rc<SocketLog>,
}

impl SocketLink for RecordingLink {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send_text(&self, frame: String) -> Result<(), SocketSendError> {
        if self.log.reject_frames.get() {
            return Err(SocketSendError::LinkClosed(self.id));
        }
        self.log.frames.borrow_mut().push(frame);
        Ok(())
    }
}
