//! Routes shell events to dialogs and windows, and applies what windows hand back.

use anyhow::Result;

use crate::{
    domain::{
        communication_params::CommunicationParams,
        events::{AppEvent, KeyInput},
        shell_state::ShellState,
    },
    mvvm::ViewModel,
    view_models::{connection::ConnectionViewModel, ViewModelHandle},
};

use super::{
    dialog_queue::DialogQueue,
    view_factory::ViewFactory,
    views::{View, ViewAction},
    window_stack::WindowStack,
};

pub struct ShellController {
    state: ShellState,
    windows: WindowStack,
    dialogs: DialogQueue,
}

impl ShellController {
    /// Shows the window for `root` and starts routing events to it.
    pub fn launch(root: ViewModelHandle, dialogs: DialogQueue) -> Result<Self> {
        let mut windows = WindowStack::default();
        let view = ViewFactory::build(&mut windows, Some(root))?;
        windows.show(view);

        Ok(Self {
            state: ShellState::default(),
            windows,
            dialogs,
        })
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn windows(&self) -> &WindowStack {
        &self.windows
    }

    pub fn dialogs(&self) -> &DialogQueue {
        &self.dialogs
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key)?,
        }

        self.windows.requery_all();
        if self.windows.is_empty() {
            self.state.stop();
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyInput) -> Result<()> {
        // An open dialog is modal: only its dismissal keys get through.
        if self.dialogs.is_open() {
            if key.dismisses_dialog() {
                self.dialogs.dismiss();
            }
            return Ok(());
        }

        let Some(view) = self.windows.active_mut() else {
            return Ok(());
        };

        match view.handle_key(key) {
            ViewAction::None => {}
            ViewAction::OpenConnection => self.open_connection()?,
            ViewAction::Apply(params) => self.apply_connection(params),
            ViewAction::Close => {
                self.close_active();
            }
        }

        Ok(())
    }

    fn open_connection(&mut self) -> Result<()> {
        let params = match self.windows.active() {
            Some(View::MainWindow(view)) => {
                view.context().borrow().observable().snapshot_model()?
            }
            _ => return Ok(()),
        };

        let view = ViewFactory::build(
            &mut self.windows,
            Some(ConnectionViewModel::new(params).into()),
        )?;
        self.windows.show(view);
        Ok(())
    }

    /// Closes the active window and disposes its view-model.
    fn close_active(&mut self) -> Option<View> {
        let closed = self.windows.close_active()?;
        closed.context().dispose();
        Some(closed)
    }

    /// Closes the connection window and hands its parameters to the window that opened it.
    fn apply_connection(&mut self, params: CommunicationParams) {
        let Some(closed) = self.close_active() else {
            return;
        };

        match closed.owner().and_then(|owner| self.windows.get(owner)) {
            Some(View::MainWindow(owner)) => {
                owner.context().borrow_mut().set_parameters(params);
            }
            _ => tracing::warn!(
                window = ?closed.id(),
                "applied parameters have no owner to receive them"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        domain::dialog::Dialog,
        usecases::contracts::MessagePresenter,
        view_models::main_window::MainWindowViewModel,
    };

    fn controller() -> ShellController {
        let dialogs = DialogQueue::default();
        let view_model = MainWindowViewModel::new(
            CommunicationParams::default(),
            Rc::new(dialogs.clone()),
        );
        ShellController::launch(view_model.into(), dialogs).expect("shell must launch")
    }

    fn key(controller: &mut ShellController, key: KeyInput) {
        controller
            .handle_event(AppEvent::InputKey(key))
            .expect("key must be handled");
    }

    fn type_text(controller: &mut ShellController, text: &str) {
        for ch in text.chars() {
            key(controller, KeyInput::Char(ch));
        }
    }

    fn main_view_model(controller: &ShellController) -> ViewModelHandle {
        controller
            .windows()
            .iter()
            .next()
            .map(View::context)
            .expect("main window must be shown")
    }

    fn message_text(controller: &ShellController) -> String {
        match main_view_model(controller) {
            ViewModelHandle::MainWindow(view_model) => {
                view_model.borrow().message_text().to_owned()
            }
            ViewModelHandle::Connection(_) => panic!("bottom window must be the main window"),
        }
    }

    #[test]
    fn quit_stops_the_shell() {
        let mut controller = controller();

        controller
            .handle_event(AppEvent::QuitRequested)
            .expect("quit must be handled");

        assert!(!controller.state().is_running());
    }

    #[test]
    fn typing_then_enter_sends_and_opens_a_dialog() {
        let mut controller = controller();

        type_text(&mut controller, "hello");
        key(&mut controller, KeyInput::Enter);

        assert_eq!(message_text(&controller), "");
        let dialog = controller.dialogs().front().expect("dialog must be open");
        assert_eq!(dialog.message, "Message sent:hello");
    }

    #[test]
    fn open_dialog_swallows_keys_until_dismissed() {
        let mut controller = controller();
        controller
            .dialogs()
            .show(Dialog::info("notice"))
            .expect("dialog must queue");

        type_text(&mut controller, "ab");
        assert_eq!(message_text(&controller), "");

        key(&mut controller, KeyInput::Esc);
        assert!(!controller.dialogs().is_open());

        type_text(&mut controller, "ab");
        assert_eq!(message_text(&controller), "ab");
    }

    #[test]
    fn connection_window_is_owned_by_main_window_and_applies_to_it() {
        let mut controller = controller();

        key(&mut controller, KeyInput::Ctrl('o'));
        assert_eq!(controller.windows().len(), 2);
        let connection = active_connection(&controller);
        let main_id = controller.windows().iter().next().map(View::id);
        assert_eq!(
            controller.windows().active().and_then(View::owner),
            main_id
        );

        key(&mut controller, KeyInput::Tab);
        for _ in 0..4 {
            key(&mut controller, KeyInput::Backspace);
        }
        type_text(&mut controller, "9000");
        key(&mut controller, KeyInput::Enter);

        assert_eq!(controller.windows().len(), 1);
        assert!(connection.borrow().observable().is_disposed());
        match main_view_model(&controller) {
            ViewModelHandle::MainWindow(view_model) => {
                assert_eq!(view_model.borrow().model().port, 9000);
                assert!(!view_model.borrow().observable().is_disposed());
            }
            ViewModelHandle::Connection(_) => panic!("bottom window must be the main window"),
        }
    }

    fn active_connection(controller: &ShellController) -> Rc<RefCell<ConnectionViewModel>> {
        match controller.windows().active().map(View::context) {
            Some(ViewModelHandle::Connection(view_model)) => view_model,
            _ => panic!("connection window must be active"),
        }
    }

    #[test]
    fn cancelling_the_connection_window_leaves_parameters_alone() {
        let mut controller = controller();

        key(&mut controller, KeyInput::Ctrl('o'));
        let connection = active_connection(&controller);
        type_text(&mut controller, ".example");
        key(&mut controller, KeyInput::Esc);

        assert_eq!(controller.windows().len(), 1);
        assert!(connection.borrow().observable().is_disposed());
        match main_view_model(&controller) {
            ViewModelHandle::MainWindow(view_model) => {
                assert_eq!(view_model.borrow().model(), &CommunicationParams::default());
            }
            ViewModelHandle::Connection(_) => panic!("bottom window must be the main window"),
        }
    }
}
