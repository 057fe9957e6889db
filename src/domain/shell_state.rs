use super::{
    connection::ConnectionState, message_input_state::MessageInputState, transcript::Transcript,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    transcript: Transcript,
    input: MessageInputState,
    transport_label: &'static str,
    connection_state: Option<ConnectionState>,
    popup: Option<String>,
}

impl ShellState {
    pub fn new(transport_label: &'static str) -> Self {
        Self {
            running: true,
            transcript: Transcript::default(),
            input: MessageInputState::default(),
            transport_label,
            connection_state: None,
            popup: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn input(&self) -> &MessageInputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut MessageInputState {
        &mut self.input
    }

    pub fn transport_label(&self) -> &'static str {
        self.transport_label
    }

    pub fn connection_state(&self) -> Option<ConnectionState> {
        self.connection_state
    }

    pub fn set_connection_state(&mut self, state: Option<ConnectionState>) {
        self.connection_state = state;
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn show_popup(&mut self, text: impl Into<String>) {
        self.popup = Some(text.into());
    }

    pub fn dismiss_popup(&mut self) -> bool {
        self.popup.take().is_some()
    }
}
