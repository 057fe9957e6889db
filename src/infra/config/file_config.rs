use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, TransportConfig, TransportMode};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub transport: Option<FileTransportConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(transport) = self.transport {
            transport.merge_into(&mut config.transport);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileTransportConfig {
    pub mode: Option<TransportMode>,
    pub rest_endpoint: Option<String>,
    pub websocket_endpoint: Option<String>,
    pub rest_fallback: Option<bool>,
}

impl FileTransportConfig {
    fn merge_into(self, config: &mut TransportConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        if let Some(endpoint) = self.rest_endpoint {
            config.rest_endpoint = endpoint;
        }

        if let Some(endpoint) = self.websocket_endpoint {
            config.websocket_endpoint = endpoint;
        }

        if let Some(fallback) = self.rest_fallback {
            config.rest_fallback = fallback;
        }
    }
}
