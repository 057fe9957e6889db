/// Who a transcript entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Bot,
    /// Locally generated notice (connection status, transport errors).
    System,
}

impl MessageKind {
    /// The kind whose look this entry takes.
    ///
    /// System notices are drawn as bot messages; `is_system_marked` adds the
    /// marker on top.
    pub fn base(self) -> Self {
        match self {
            Self::User => Self::User,
            Self::Bot | Self::System => Self::Bot,
        }
    }

    pub fn is_system_marked(self) -> bool {
        matches!(self, Self::System)
    }

    /// True for entries drawn on the remote side of the transcript.
    pub fn is_remote_side(self) -> bool {
        self.base() == Self::Bot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}
