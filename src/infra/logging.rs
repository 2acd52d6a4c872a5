use std::{fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

const LOG_FILE_PREFIX: &str = "parley.log";

/// Installs the global subscriber writing to a daily-rotated file.
///
/// The terminal UI owns stdout, so logs never go to the console. The returned
/// guard flushes buffered lines when dropped and must live for the whole run.
pub fn init(config: &LogConfig, default_dir: &Path) -> Result<WorkerGuard, AppError> {
    let directory = config
        .directory
        .clone()
        .unwrap_or_else(|| default_dir.to_path_buf());

    fs::create_dir_all(&directory).map_err(|source| AppError::StorageDirCreate {
        path: directory.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::daily(&directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}
