use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, SettingsConfig, UiConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub settings: Option<FileSettingsConfig>,
    pub ui: Option<FileUiConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(settings) = self.settings {
            settings.merge_into(&mut config.settings);
        }

        if let Some(ui) = self.ui {
            ui.merge_into(&mut config.ui);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub directory: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(directory) = self.directory {
            config.directory = Some(directory);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSettingsConfig {
    pub path: Option<PathBuf>,
}

impl FileSettingsConfig {
    fn merge_into(self, config: &mut SettingsConfig) {
        if let Some(path) = self.path {
            config.path = Some(path);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileUiConfig {
    pub tick_ms: Option<u64>,
}

impl FileUiConfig {
    fn merge_into(self, config: &mut UiConfig) {
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms.max(1);
        }
    }
}
