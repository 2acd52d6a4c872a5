use std::{cell::RefCell, collections::BTreeMap};

use anyhow::{bail, Result};

use crate::{
    domain::dialog::Dialog,
    infra::{
        config::AppConfig,
        contracts::{ConfigAdapter, SettingsStore},
        error::AppError,
    },
    usecases::contracts::MessagePresenter,
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        Ok(AppConfig::default())
    }
}

/// In-memory settings that count saves and can be told to fail them.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    pub values: BTreeMap<String, String>,
    pub saves: usize,
    pub fail_saves: bool,
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    fn save(&mut self) -> Result<()> {
        if self.fail_saves {
            bail!("settings storage unavailable");
        }
        self.saves += 1;
        Ok(())
    }
}

/// Presenter that records dialogs, or rejects all of them when failing.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    dialogs: RefCell<Vec<Dialog>>,
    failing: bool,
}

impl RecordingPresenter {
    pub fn failing() -> Self {
        Self {
            dialogs: RefCell::default(),
            failing: true,
        }
    }

    pub fn dialogs(&self) -> Vec<Dialog> {
        self.dialogs.borrow().clone()
    }
}

impl MessagePresenter for RecordingPresenter {
    fn show(&self, dialog: Dialog) -> Result<()> {
        if self.failing {
            bail!("presenter unavailable");
        }
        self.dialogs.borrow_mut().push(dialog);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter;
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn memory_store_counts_saves_and_can_fail() {
        let mut store = MemorySettingsStore::default();
        store.set("key", "value");
        store.save().expect("save must succeed");

        store.fail_saves = true;
        assert!(store.save().is_err());
        assert_eq!(store.saves, 1);
        assert_eq!(store.get("key").as_deref(), Some("value"));
    }
}
