use std::{env, fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "nebula-chat";
const LOG_FILE_NAME: &str = "nebula-chat.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl StorageLayout {
    /// `NEBULA_CHAT_HOME` wins over the platform data directory.
    pub fn resolve() -> Result<Self, AppError> {
        let data_dir = env::var_os("NEBULA_CHAT_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|base| base.join(APP_DIR_NAME)))
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "no local data directory for this platform (set NEBULA_CHAT_HOME)".into(),
            })?;

        Ok(Self::rooted_at(data_dir))
    }

    pub fn rooted_at(data_dir: PathBuf) -> Self {
        let log_dir = data_dir.join("logs");
        Self { data_dir, log_dir }
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.log_dir).map_err(|source| AppError::StorageDirCreate {
            path: self.log_dir.clone(),
            source,
        })
    }

    pub fn log_file_name(&self) -> &'static str {
        LOG_FILE_NAME
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}
