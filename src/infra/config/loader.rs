use std::{
    fs,
    path::{Path, PathBuf},
};

use reqwest::Url;

use crate::infra::{
    config::{file_config::FileConfig, AppConfig, TransportConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if config_path.exists() {
        let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
            path: config_path.clone(),
            source,
        })?;

        let file_config: FileConfig =
            toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
                path: config_path,
                source,
            })?;

        file_config.merge_into(&mut config);
    }

    validate_transport(&config.transport)?;
    Ok(config)
}

fn validate_transport(transport: &TransportConfig) -> Result<(), AppError> {
    validate_endpoint("rest_endpoint", &transport.rest_endpoint, &["http", "https"])?;
    validate_endpoint(
        "websocket_endpoint",
        &transport.websocket_endpoint,
        &["ws", "wss"],
    )
}

fn validate_endpoint(
    field: &'static str,
    value: &str,
    schemes: &[&str],
) -> Result<(), AppError> {
    let url = Url::parse(value).map_err(|error| AppError::InvalidEndpoint {
        field,
        value: value.to_owned(),
        reason: error.to_string(),
    })?;

    if !schemes.contains(&url.scheme()) {
        return Err(AppError::InvalidEndpoint {
            field,
            value: value.to_owned(),
            reason: format!("scheme must be one of {}", schemes.join(", ")),
        });
    }

    Ok(())
}
