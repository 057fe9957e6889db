mod app_config;
mod file_config;
mod loader;

pub use app_config::{AppConfig, LogConfig, TransportConfig, TransportMode};
pub use loader::load;
