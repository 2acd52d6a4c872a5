//! Connection window, shown over the main window while parameters are edited.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::events::KeyInput,
    mvvm::{BoundCommand, Subscription, ViewModel},
    ui::styles,
    view_models::connection::{ConnectionField, ConnectionViewModel},
};

use super::{ViewAction, WindowInfo};

const WINDOW_WIDTH: u16 = 64;
// borders + one line per field + spacer + hints
const WINDOW_HEIGHT: u16 = ConnectionField::ALL.len() as u16 + 4;
const LABEL_WIDTH: usize = 16;
const FOCUS_MARKER: &str = "> ";

pub struct ConnectionView {
    window: WindowInfo,
    context: Rc<RefCell<ConnectionViewModel>>,
    apply: BoundCommand<ConnectionViewModel, ()>,
    stale: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl ConnectionView {
    pub fn new(window: WindowInfo, context: Rc<RefCell<ConnectionViewModel>>) -> Self {
        let stale = Rc::new(Cell::new(false));
        let (apply, subscription) = {
            let view_model = context.borrow();
            let flag = Rc::clone(&stale);
            let subscription = view_model.subscribe(move |_| flag.set(true));
            let apply = BoundCommand::bind(view_model.apply_command(), &*view_model, &());
            (apply, subscription)
        };

        Self {
            window,
            context,
            apply,
            stale,
            _subscription: subscription,
        }
    }

    pub fn window(&self) -> WindowInfo {
        self.window
    }

    pub fn context(&self) -> &Rc<RefCell<ConnectionViewModel>> {
        &self.context
    }

    pub fn apply_enabled(&self) -> bool {
        self.apply.is_enabled()
    }

    pub fn requery(&mut self) {
        if !self.stale.replace(false) {
            return;
        }

        let view_model = self.context.borrow();
        if self.apply.requery(&*view_model, &()) {
            tracing::debug!(enabled = self.apply.is_enabled(), "apply command requeried");
        }
    }

    pub fn handle_key(&mut self, key: KeyInput) -> ViewAction {
        let mut view_model = self.context.borrow_mut();
        match key {
            KeyInput::Char(ch) => view_model.push_char(ch),
            KeyInput::Backspace => view_model.pop_char(),
            KeyInput::Tab => view_model.focus_next(),
            KeyInput::Enter => {
                self.apply.trigger(&mut *view_model, &());
                if let Some(params) = view_model.take_applied() {
                    return ViewAction::Apply(params);
                }
            }
            KeyInput::Esc => return ViewAction::Close,
            KeyInput::Ctrl(_)
            | KeyInput::Delete
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Home
            | KeyInput::End => {}
        }

        ViewAction::None
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, active: bool) {
        let view_model = self.context.borrow();
        let area = super::centered_rect(WINDOW_WIDTH, WINDOW_HEIGHT, area);
        let border_style = if active {
            styles::active_window_border_style()
        } else {
            styles::inactive_window_border_style()
        };

        let mut lines: Vec<Line<'static>> = ConnectionField::ALL
            .iter()
            .map(|field| field_line(&view_model, *field))
            .collect();
        lines.push(Line::from(""));
        lines.push(hint_line(self.apply_enabled()));

        let block = Block::default()
            .title(Span::styled(" Connection ", styles::window_title_style()))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if active {
            let focused = view_model.focused_field();
            let row = ConnectionField::ALL
                .iter()
                .position(|field| *field == focused)
                .unwrap_or(0);
            let value_width = view_model.field_value(focused).width();
            let cursor_x = inner
                .x
                .saturating_add((FOCUS_MARKER.len() + LABEL_WIDTH) as u16)
                .saturating_add(value_width.min(u16::MAX as usize) as u16)
                .min(inner.right().saturating_sub(1));
            frame.set_cursor_position((cursor_x, inner.y.saturating_add(row as u16)));
        }
    }
}

fn field_line(view_model: &ConnectionViewModel, field: ConnectionField) -> Line<'static> {
    let focused = view_model.focused_field() == field;
    let (marker, label_style) = if focused {
        (FOCUS_MARKER, styles::focused_field_label_style())
    } else {
        ("  ", styles::field_label_style())
    };

    let mut spans = vec![
        Span::styled(marker.to_owned(), label_style),
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
        Span::styled(
            view_model.field_value(field).to_owned(),
            styles::input_text_style(),
        ),
    ];
    if field == ConnectionField::ArchiveDir && !view_model.archive_dir_valid() {
        spans.push(Span::styled(
            "  (folder doesn't exist)",
            styles::invalid_field_style(),
        ));
    }

    Line::from(spans)
}

fn hint_line(apply_enabled: bool) -> Line<'static> {
    let apply_style = if apply_enabled {
        styles::command_enabled_style()
    } else {
        styles::command_disabled_style()
    };

    Line::from(vec![
        Span::styled("Tab next field · Enter ", styles::status_bar_style()),
        Span::styled("apply", apply_style),
        Span::styled(" · Esc cancel", styles::status_bar_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::communication_params::CommunicationParams, ui::views::WindowId};

    fn view() -> ConnectionView {
        let window = WindowInfo {
            id: WindowId(2),
            owner: Some(WindowId(1)),
        };
        let view_model = ConnectionViewModel::new(CommunicationParams::default());
        ConnectionView::new(window, Rc::new(RefCell::new(view_model)))
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn enter_applies_and_hands_back_parameters() {
        let mut view = view();
        view.handle_key(KeyInput::Tab);
        for _ in 0..4 {
            view.handle_key(KeyInput::Backspace);
        }
        for ch in "9000".chars() {
            view.handle_key(KeyInput::Char(ch));
        }
        view.requery();

        let action = view.handle_key(KeyInput::Enter);

        let ViewAction::Apply(params) = &action else {
            panic!("expected apply, got {action:?}");
        };
        assert_eq!(params.address(), "localhost:9000");
    }

    #[test]
    fn enter_does_nothing_once_apply_is_disabled() {
        let mut view = view();
        view.handle_key(KeyInput::Tab);
        for _ in 0..4 {
            view.handle_key(KeyInput::Backspace);
        }
        view.requery();
        assert!(!view.apply_enabled());

        assert_eq!(view.handle_key(KeyInput::Enter), ViewAction::None);
    }

    #[test]
    fn escape_closes_without_applying() {
        let mut view = view();

        assert_eq!(view.handle_key(KeyInput::Esc), ViewAction::Close);
    }

    #[test]
    fn focused_field_is_marked() {
        let view = view();
        let view_model = view.context().borrow();

        assert!(text(&field_line(&view_model, ConnectionField::Endpoint)).starts_with(FOCUS_MARKER));
        assert!(!text(&field_line(&view_model, ConnectionField::Port)).starts_with(FOCUS_MARKER));
    }

    #[test]
    fn missing_archive_folder_is_flagged() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let view = view();
        view.context().borrow_mut().set_field(
            ConnectionField::ArchiveDir,
            dir.path().join("absent").to_string_lossy().to_string(),
        );

        let line = field_line(&view.context().borrow(), ConnectionField::ArchiveDir);

        assert!(text(&line).contains("folder doesn't exist"));
    }

    #[test]
    fn hint_dims_disabled_apply() {
        assert_eq!(hint_line(false).spans[1].style, styles::command_disabled_style());
    }
}
