use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::{config::AppConfig, storage_layout::StorageLayout};

pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
    /// Runs transport I/O; the UI loop itself stays on the main thread.
    pub runtime: Runtime,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        layout: StorageLayout,
        runtime: Runtime,
        log_guard: Option<WorkerGuard>,
    ) -> Self {
        Self {
            config,
            layout,
            runtime,
            _log_guard: log_guard,
        }
    }
}
