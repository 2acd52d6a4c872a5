//! File-backed key/value settings.
//!
//! The document is kept as a `toml_edit` tree so keys this process never
//! touched (and their formatting) survive a save.

use std::{
    fs::{self, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fs2::FileExt;
use toml_edit::DocumentMut;

use crate::infra::{contracts::SettingsStore, error::AppError};

/// Setting holding the serialized communication parameters.
pub const MAIN_PARAM_KEY: &str = "main_param";

#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    document: DocumentMut,
}

impl FileSettingsStore {
    /// Opens the settings at `path`; a missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let document = match fs::read_to_string(&path) {
            Ok(raw) => raw
                .parse::<DocumentMut>()
                .map_err(|source| AppError::SettingsParse {
                    path: path.clone(),
                    source,
                })?,
            Err(source) if source.kind() == ErrorKind::NotFound => DocumentMut::new(),
            Err(source) => return Err(AppError::SettingsRead { path, source }),
        };

        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.document
            .get(key)
            .and_then(|item| item.as_str())
            .map(str::to_owned)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.document[key] = toml_edit::value(value);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.document.remove(key).is_some()
    }

    fn save(&mut self) -> Result<()> {
        write_locked(&self.path, &self.document.to_string())?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Writes through a temp file and rename while holding an exclusive lock.
fn write_locked(path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::StorageDirCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let lock_path = path.with_extension("lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|source| AppError::SettingsWrite {
            path: lock_path.clone(),
            source,
        })?;
    FileExt::try_lock_exclusive(&lock_file).map_err(|source| AppError::SettingsLocked {
        path: lock_path.clone(),
        source,
    })?;

    let temp_path = path.with_extension("toml.tmp");
    fs::write(&temp_path, contents).map_err(|source| AppError::SettingsWrite {
        path: temp_path.clone(),
        source,
    })?;
    fs::rename(&temp_path, path).map_err(|source| AppError::SettingsWrite {
        path: path.to_path_buf(),
        source,
    })?;

    // The lock is released when `lock_file` is dropped.
    Ok(())
}
