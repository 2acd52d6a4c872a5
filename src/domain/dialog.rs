use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

/// A modal message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
    pub shown_at: DateTime<Local>,
}

impl Dialog {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Error, message)
    }

    fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Local::now(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Info => "Info",
            DialogKind::Error => "Error",
        }
    }
}
