use anyhow::Result;

use crate::domain::{dialog::Dialog, events::AppEvent};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

/// Channel through which view-models report results and failures to the user.
pub trait MessagePresenter {
    fn show(&self, dialog: Dialog) -> Result<()>;
}
