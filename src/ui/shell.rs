use std::time::Duration;

use anyhow::Result;
use ratatui::{backend::Backend, Terminal};

use crate::{
    usecases::{context::AppContext, contracts::AppEventSource},
    view_models::ViewModelHandle,
};

use super::{
    controller::ShellController, dialog_queue::DialogQueue, event_source::CrosstermEventSource,
    terminal::TerminalSession, view,
};

/// Presents `root` in the terminal until the user quits.
pub fn start(context: &AppContext, root: ViewModelHandle, dialogs: DialogQueue) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        tick_ms = context.config.ui.tick_ms,
        root = root.kind(),
        "starting TUI shell"
    );

    let mut controller = ShellController::launch(root, dialogs)?;
    let mut event_source =
        CrosstermEventSource::new(Duration::from_millis(context.config.ui.tick_ms));
    let mut session = TerminalSession::new()?;

    run(session.terminal_mut(), &mut event_source, &mut controller)
}

pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    event_source: &mut dyn AppEventSource,
    controller: &mut ShellController,
) -> Result<()> {
    while controller.state().is_running() {
        terminal.draw(|frame| view::render(frame, controller.windows(), controller.dialogs()))?;

        if let Some(event) = event_source.next_event()? {
            controller.handle_event(event)?;
        }
    }

    tracing::info!("TUI shell stopped");
    Ok(())
}
