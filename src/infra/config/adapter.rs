use std::path::{Path, PathBuf};

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
    error::AppError,
};

/// Reads `config.toml`, or the file given with `--config`.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        let config = load(self.path.as_deref())?;
        tracing::trace!(path = ?self.path, "config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_the_given_file() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[ui]\ntick_ms = 250\n").expect("config fixture must be written");

        let config = FileConfigAdapter::new(Some(&path))
            .load()
            .expect("config must load");

        assert_eq!(config.ui.tick_ms, 250);
        assert_eq!(config.logging, AppConfig::default().logging);
    }

    #[test]
    fn malformed_file_keeps_its_typed_error() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[ui\n").expect("config fixture must be written");

        let error = FileConfigAdapter::new(Some(&path))
            .load()
            .expect_err("malformed config must fail");

        assert!(matches!(error, AppError::ConfigParse { .. }));
    }
}
