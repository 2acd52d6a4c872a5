//! Parameters describing where and as whom messages are sent.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 7400;

/// The model edited by the shell and persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicationParams {
    pub endpoint: String,
    pub port: u16,
    pub sender_name: String,
    /// Folder receiving copies of sent messages; empty disables archiving.
    pub archive_dir: String,
    pub timeout_ms: u32,
}

impl Default for CommunicationParams {
    fn default() -> Self {
        Self {
            endpoint: "localhost".to_owned(),
            port: DEFAULT_PORT,
            sender_name: String::new(),
            archive_dir: String::new(),
            timeout_ms: 5_000,
        }
    }
}

impl CommunicationParams {
    /// `endpoint:port` label shown in window titles.
    pub fn address(&self) -> String {
        format!("{}:{}", self.endpoint, self.port)
    }
}
