//! The message container shown in the chat panel.

use super::message::{Message, MessageKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    /// Index of the entry the view is pinned to (the newest one).
    scroll_anchor: Option<usize>,
}

impl Transcript {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    /// Appends a new entry and scrolls to the end.
    pub fn append(&mut self, text: &str, kind: MessageKind) {
        self.messages.push(Message::new(text, kind));
        self.scroll_to_end();
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_anchor = self.messages.len().checked_sub(1);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn count_of(&self, kind: MessageKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }
}
