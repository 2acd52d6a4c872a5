use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::{config::AppConfig, storage_layout::StorageLayout};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
    log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, layout: StorageLayout) -> Self {
        Self {
            config,
            layout,
            log_guard: None,
        }
    }

    /// Keeps the log writer alive for as long as the context exists.
    pub fn attach_log_guard(&mut self, guard: WorkerGuard) {
        self.log_guard = Some(guard);
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config
            .settings
            .path
            .clone()
            .unwrap_or_else(|| self.layout.settings_file())
    }
}
