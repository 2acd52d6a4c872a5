use anyhow::Result;

use crate::infra::{config::AppConfig, error::AppError};

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError>;
}

/// String-valued key/value settings persisted between runs.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str) -> bool;
    fn save(&mut self) -> Result<()>;
}
