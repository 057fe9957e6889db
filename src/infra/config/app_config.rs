use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Rest,
    #[serde(alias = "ws")]
    Websocket,
}

impl TransportMode {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::Websocket => "WebSocket",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    pub mode: TransportMode,
    pub rest_endpoint: String,
    pub websocket_endpoint: String,
    /// Also post over REST when a send finds the socket not open.
    pub rest_fallback: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Rest,
            rest_endpoint: "http://127.0.0.1:8000/chat".to_owned(),
            websocket_endpoint: "wss://performanceoptimizer.com.br/ws".to_owned(),
            rest_fallback: true,
        }
    }
}
