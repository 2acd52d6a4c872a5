//! View-model behind the main window: the message field and the send command.

use std::{cell::OnceCell, fs, path::Path, rc::Rc};

use anyhow::{Context, Result};
use chrono::Local;

use crate::{
    domain::{communication_params::CommunicationParams, dialog::Dialog},
    mvvm::{assign, snapshot, validation, Command, Observable, PropertyKey, ViewModel},
    usecases::contracts::MessagePresenter,
};

/// Maximum number of characters accepted in the message field.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainWindowProperty {
    Model,
    MessageText,
    CursorPosition,
}

impl PropertyKey for MainWindowProperty {
    fn name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::MessageText => "message_text",
            Self::CursorPosition => "cursor_position",
        }
    }
}

pub type SendCommand = Command<MainWindowViewModel, CommunicationParams>;

pub struct MainWindowViewModel {
    observable: Observable<CommunicationParams>,
    /// Pending text, not part of the persisted model.
    message_text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
    presenter: Rc<dyn MessagePresenter>,
    send_command: OnceCell<SendCommand>,
}

impl MainWindowViewModel {
    pub fn new(model: CommunicationParams, presenter: Rc<dyn MessagePresenter>) -> Self {
        Self {
            observable: Observable::new(model),
            message_text: String::new(),
            cursor_position: 0,
            presenter,
            send_command: OnceCell::new(),
        }
    }

    pub fn message_text(&self) -> &str {
        &self.message_text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn set_message_text(&mut self, value: impl Into<String>) {
        if assign(&mut self.message_text, value.into()) {
            self.on_property_changed(MainWindowProperty::MessageText);
        }
    }

    /// Replaces the connection parameters, e.g. after the connection window applied.
    pub fn set_parameters(&mut self, params: CommunicationParams) {
        if assign(self.observable.model_mut(), params) {
            self.on_property_changed(MainWindowProperty::Model);
        }
    }

    fn set_cursor_position(&mut self, position: usize) {
        if assign(&mut self.cursor_position, position) {
            self.on_property_changed(MainWindowProperty::CursorPosition);
        }
    }

    /// Inserts a character at the cursor.
    /// Returns false if the text would exceed [`MAX_MESSAGE_LENGTH`].
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.message_text.chars().count() >= MAX_MESSAGE_LENGTH {
            return false;
        }

        let mut text = self.message_text.clone();
        text.insert(char_to_byte_index(&text, self.cursor_position), ch);
        let position = self.cursor_position + 1;

        self.set_message_text(text);
        self.set_cursor_position(position);
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position == 0 {
            return;
        }

        let position = self.cursor_position - 1;
        let mut text = self.message_text.clone();
        text.remove(char_to_byte_index(&text, position));

        self.set_message_text(text);
        self.set_cursor_position(position);
    }

    /// Deletes the character under the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        if self.cursor_position >= self.message_text.chars().count() {
            return;
        }

        let mut text = self.message_text.clone();
        text.remove(char_to_byte_index(&text, self.cursor_position));
        self.set_message_text(text);
    }

    pub fn move_cursor_left(&mut self) {
        self.set_cursor_position(self.cursor_position.saturating_sub(1));
    }

    pub fn move_cursor_right(&mut self) {
        let length = self.message_text.chars().count();
        self.set_cursor_position((self.cursor_position + 1).min(length));
    }

    pub fn move_cursor_home(&mut self) {
        self.set_cursor_position(0);
    }

    pub fn move_cursor_end(&mut self) {
        self.set_cursor_position(self.message_text.chars().count());
    }

    pub fn send_command(&self) -> SendCommand {
        self.send_command
            .get_or_init(|| Command::with_predicate("send", Self::send, Self::can_send))
            .clone()
    }

    fn can_send(&self, _params: &CommunicationParams) -> bool {
        validation::validate_not_empty(&self.message_text, false).unwrap_or(false)
    }

    fn send(&mut self, params: &CommunicationParams) {
        if let Err(error) = self.start_send(params) {
            tracing::warn!(error = ?error, "send failed");
            self.show_error(&error);
        }
    }

    // No transport yet: the message is archived when configured and echoed back.
    fn start_send(&mut self, params: &CommunicationParams) -> Result<()> {
        let outgoing = snapshot::deep_clone(params)?;
        let text = self.message_text.clone();

        if !outgoing.archive_dir.is_empty() {
            validation::validate_folder_exists(&outgoing.archive_dir, true)?;
            archive_message(Path::new(&outgoing.archive_dir), &text)?;
        }

        self.presenter.show(Dialog::info(format!("Message sent:{text}")))?;
        self.set_message_text(String::new());

        tracing::info!(
            address = %outgoing.address(),
            chars = text.chars().count(),
            "message echoed"
        );
        Ok(())
    }

    fn show_error(&self, error: &anyhow::Error) {
        if let Err(report_error) = self.presenter.show(Dialog::error(format!("{error:#}"))) {
            tracing::error!(error = ?report_error, "failed to report send failure");
        }
    }
}

impl ViewModel for MainWindowViewModel {
    type Model = CommunicationParams;
    type Property = MainWindowProperty;

    fn observable(&self) -> &Observable<CommunicationParams> {
        &self.observable
    }

    fn observable_mut(&mut self) -> &mut Observable<CommunicationParams> {
        &mut self.observable
    }

    fn after_property_changed(&mut self, property_name: &'static str) {
        if property_name == MainWindowProperty::MessageText.name() {
            let length = self.message_text.chars().count();
            if self.cursor_position > length {
                self.set_cursor_position(length);
            }
        }
    }
}

fn archive_message(dir: &Path, text: &str) -> Result<()> {
    let file_name = format!("{}.txt", Local::now().format("%Y%m%d-%H%M%S%.3f"));
    let path = dir.join(file_name);

    fs::write(&path, text)
        .with_context(|| format!("failed to archive message to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "message archived");
    Ok(())
}

/// Converts character index to byte index.
fn char_to_byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(text.len())
}
