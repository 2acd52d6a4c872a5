//! View-model of the connection window, which edits a detached copy of the
//! communication parameters and hands them back when applied.

use std::cell::OnceCell;

use crate::{
    domain::communication_params::CommunicationParams,
    mvvm::{assign, validation, Command, Observable, PropertyKey, ViewModel},
};

const MAX_PORT_DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionField {
    Endpoint,
    Port,
    SenderName,
    ArchiveDir,
}

impl ConnectionField {
    pub const ALL: [Self; 4] = [Self::Endpoint, Self::Port, Self::SenderName, Self::ArchiveDir];

    pub fn label(self) -> &'static str {
        match self {
            Self::Endpoint => "Endpoint",
            Self::Port => "Port",
            Self::SenderName => "Sender",
            Self::ArchiveDir => "Archive folder",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Endpoint => Self::Port,
            Self::Port => Self::SenderName,
            Self::SenderName => Self::ArchiveDir,
            Self::ArchiveDir => Self::Endpoint,
        }
    }

    fn property(self) -> ConnectionProperty {
        match self {
            Self::Endpoint => ConnectionProperty::Endpoint,
            Self::Port => ConnectionProperty::PortText,
            Self::SenderName => ConnectionProperty::SenderName,
            Self::ArchiveDir => ConnectionProperty::ArchiveDir,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionProperty {
    Endpoint,
    PortText,
    Port,
    SenderName,
    ArchiveDir,
    ArchiveDirValid,
    FocusedField,
}

impl PropertyKey for ConnectionProperty {
    fn name(self) -> &'static str {
        match self {
            Self::Endpoint => "endpoint",
            Self::PortText => "port_text",
            Self::Port => "port",
            Self::SenderName => "sender_name",
            Self::ArchiveDir => "archive_dir",
            Self::ArchiveDirValid => "archive_dir_valid",
            Self::FocusedField => "focused_field",
        }
    }
}

pub type ApplyCommand = Command<ConnectionViewModel, ()>;

pub struct ConnectionViewModel {
    observable: Observable<CommunicationParams>,
    port_text: String,
    focused_field: ConnectionField,
    archive_dir_valid: bool,
    applied: Option<CommunicationParams>,
    apply_command: OnceCell<ApplyCommand>,
}

impl ConnectionViewModel {
    /// `model` should be a snapshot; edits never reach the caller's copy until applied.
    pub fn new(model: CommunicationParams) -> Self {
        let port_text = model.port.to_string();
        let archive_dir_valid = archive_dir_is_usable(&model.archive_dir);

        Self {
            observable: Observable::new(model),
            port_text,
            focused_field: ConnectionField::Endpoint,
            archive_dir_valid,
            applied: None,
            apply_command: OnceCell::new(),
        }
    }

    pub fn field_value(&self, field: ConnectionField) -> &str {
        let model = self.observable.model();
        match field {
            ConnectionField::Endpoint => &model.endpoint,
            ConnectionField::Port => &self.port_text,
            ConnectionField::SenderName => &model.sender_name,
            ConnectionField::ArchiveDir => &model.archive_dir,
        }
    }

    pub fn focused_field(&self) -> ConnectionField {
        self.focused_field
    }

    pub fn archive_dir_valid(&self) -> bool {
        self.archive_dir_valid
    }

    pub fn focus_next(&mut self) {
        let next = self.focused_field.next();
        if assign(&mut self.focused_field, next) {
            self.on_property_changed(ConnectionProperty::FocusedField);
        }
    }

    pub fn set_field(&mut self, field: ConnectionField, value: String) {
        let model = self.observable.model_mut();
        let changed = match field {
            ConnectionField::Endpoint => assign(&mut model.endpoint, value),
            ConnectionField::Port => assign(&mut self.port_text, value),
            ConnectionField::SenderName => assign(&mut model.sender_name, value),
            ConnectionField::ArchiveDir => assign(&mut model.archive_dir, value),
        };

        if changed {
            self.on_property_changed(field.property());
        }
    }

    /// Appends to the focused field. The port only accepts digits.
    pub fn push_char(&mut self, ch: char) {
        let field = self.focused_field;
        if field == ConnectionField::Port
            && (!ch.is_ascii_digit() || self.port_text.len() >= MAX_PORT_DIGITS)
        {
            return;
        }

        let mut value = self.field_value(field).to_owned();
        value.push(ch);
        self.set_field(field, value);
    }

    pub fn pop_char(&mut self) {
        let field = self.focused_field;
        let mut value = self.field_value(field).to_owned();
        if value.pop().is_some() {
            self.set_field(field, value);
        }
    }

    pub fn apply_command(&self) -> ApplyCommand {
        self.apply_command
            .get_or_init(|| Command::with_predicate("apply", Self::apply, Self::can_apply))
            .clone()
    }

    /// Parameters produced by the last apply, if any. Taking clears them.
    pub fn take_applied(&mut self) -> Option<CommunicationParams> {
        self.applied.take()
    }

    fn parsed_port(&self) -> Option<u16> {
        self.port_text.parse::<u16>().ok().filter(|port| *port != 0)
    }

    fn can_apply(&self, _: &()) -> bool {
        let endpoint_present =
            validation::validate_not_empty(&self.observable.model().endpoint, false)
                .unwrap_or(false);

        endpoint_present && self.parsed_port().is_some() && self.archive_dir_valid
    }

    fn apply(&mut self, _: &()) {
        if self.parsed_port().is_none() {
            tracing::warn!(port = %self.port_text, "apply ignored: invalid port");
            return;
        }

        self.applied = Some(self.observable.model().clone());
        tracing::info!(address = %self.observable.model().address(), "connection parameters applied");
    }
}

impl ViewModel for ConnectionViewModel {
    type Model = CommunicationParams;
    type Property = ConnectionProperty;

    fn observable(&self) -> &Observable<CommunicationParams> {
        &self.observable
    }

    fn observable_mut(&mut self) -> &mut Observable<CommunicationParams> {
        &mut self.observable
    }

    fn after_property_changed(&mut self, property_name: &'static str) {
        if property_name == ConnectionProperty::PortText.name() {
            if let Some(port) = self.parsed_port() {
                if assign(&mut self.observable.model_mut().port, port) {
                    self.on_property_changed(ConnectionProperty::Port);
                }
            }
        } else if property_name == ConnectionProperty::ArchiveDir.name() {
            let valid = archive_dir_is_usable(&self.observable.model().archive_dir);
            if assign(&mut self.archive_dir_valid, valid) {
                self.on_property_changed(ConnectionProperty::ArchiveDirValid);
            }
        }
    }
}

/// Empty disables archiving and is therefore acceptable.
fn archive_dir_is_usable(path: &str) -> bool {
    path.is_empty() || validation::validate_folder_exists(path, false).unwrap_or(false)
}
