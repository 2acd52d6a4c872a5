//! Main window: connection summary, message field and send status.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{communication_params::CommunicationParams, events::KeyInput},
    mvvm::{BoundCommand, Subscription, ViewModel},
    ui::styles,
    view_models::main_window::{MainWindowProperty, MainWindowViewModel, MAX_MESSAGE_LENGTH},
};

use super::{
    input_line::{visible_window, PROMPT_SYMBOL},
    ViewAction, WindowInfo,
};

/// Placeholder text shown while the message field is empty.
const PLACEHOLDER_TEXT: &str = "Type a message and press Enter";

pub struct MainWindowView {
    window: WindowInfo,
    context: Rc<RefCell<MainWindowViewModel>>,
    send: BoundCommand<MainWindowViewModel, CommunicationParams>,
    stale: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl MainWindowView {
    pub fn new(window: WindowInfo, context: Rc<RefCell<MainWindowViewModel>>) -> Self {
        let stale = Rc::new(Cell::new(false));
        let (send, subscription) = {
            let view_model = context.borrow();
            let flag = Rc::clone(&stale);
            // Only the message text feeds the send predicate.
            let subscription = view_model.subscribe(move |args| {
                if args.affects(MainWindowProperty::MessageText) {
                    flag.set(true);
                }
            });
            let send = BoundCommand::bind(
                view_model.send_command(),
                &*view_model,
                view_model.model(),
            );
            (send, subscription)
        };

        Self {
            window,
            context,
            send,
            stale,
            _subscription: subscription,
        }
    }

    pub fn window(&self) -> WindowInfo {
        self.window
    }

    pub fn context(&self) -> &Rc<RefCell<MainWindowViewModel>> {
        &self.context
    }

    pub fn send_enabled(&self) -> bool {
        self.send.is_enabled()
    }

    /// Re-evaluates the send command once the view-model reported a change.
    pub fn requery(&mut self) {
        if !self.stale.replace(false) {
            return;
        }

        let view_model = self.context.borrow();
        if self.send.requery(&*view_model, view_model.model()) {
            tracing::debug!(enabled = self.send.is_enabled(), "send command requeried");
        }
    }

    pub fn handle_key(&mut self, key: KeyInput) -> ViewAction {
        let mut view_model = self.context.borrow_mut();
        match key {
            KeyInput::Char(ch) => {
                view_model.insert_char(ch);
            }
            KeyInput::Backspace => view_model.delete_char_before(),
            KeyInput::Delete => view_model.delete_char_at(),
            KeyInput::Left => view_model.move_cursor_left(),
            KeyInput::Right => view_model.move_cursor_right(),
            KeyInput::Home => view_model.move_cursor_home(),
            KeyInput::End => view_model.move_cursor_end(),
            KeyInput::Enter => {
                let params = view_model.model().clone();
                if !self.send.trigger(&mut *view_model, &params) {
                    tracing::debug!("send ignored: command disabled");
                }
            }
            KeyInput::Ctrl('o') => return ViewAction::OpenConnection,
            KeyInput::Ctrl(_) | KeyInput::Tab | KeyInput::Esc => {}
        }

        ViewAction::None
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, active: bool) {
        let view_model = self.context.borrow();
        let border_style = if active {
            styles::active_window_border_style()
        } else {
            styles::inactive_window_border_style()
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" parley · {} ", view_model.model().address()),
                styles::window_title_style(),
            ))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // 3 lines for input: 1 border + 1 text + 1 border
        let [summary_area, input_area, status_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(inner);

        frame.render_widget(
            Paragraph::new(summary_lines(view_model.model())),
            summary_area,
        );

        let text_width = input_area
            .width
            .saturating_sub(2)
            .saturating_sub(PROMPT_SYMBOL.width() as u16) as usize;
        let (visible, cursor_column) = visible_window(
            view_model.message_text(),
            view_model.cursor_position(),
            text_width,
        );
        frame.render_widget(
            Paragraph::new(input_line(&visible)).block(
                Block::default()
                    .title("Message")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            ),
            input_area,
        );

        frame.render_widget(
            Paragraph::new(status_line(
                self.send_enabled(),
                view_model.message_text().chars().count(),
            )),
            status_area,
        );

        if active {
            // Saturating arithmetic keeps very wide terminals from overflowing.
            let cursor_x = input_area
                .x
                .saturating_add(1)
                .saturating_add(PROMPT_SYMBOL.width() as u16)
                .saturating_add(cursor_column.min(u16::MAX as usize) as u16);
            let cursor_y = input_area.y.saturating_add(1);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn summary_lines(params: &CommunicationParams) -> Vec<Line<'static>> {
    let sender = if params.sender_name.is_empty() {
        "(anonymous)".to_owned()
    } else {
        params.sender_name.clone()
    };
    let archive = if params.archive_dir.is_empty() {
        "disabled".to_owned()
    } else {
        params.archive_dir.clone()
    };

    vec![
        summary_line("Sender", sender),
        summary_line("Archive", archive),
        summary_line("Timeout", format!("{} ms", params.timeout_ms)),
    ]
}

fn summary_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<9}"), styles::field_label_style()),
        Span::styled(value, styles::input_text_style()),
    ])
}

fn input_line(visible: &str) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());
    if visible.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(visible.to_owned(), styles::input_text_style()),
        ])
    }
}

fn status_line(send_enabled: bool, length: usize) -> Line<'static> {
    let send_style = if send_enabled {
        styles::command_enabled_style()
    } else {
        styles::command_disabled_style()
    };

    Line::from(vec![
        Span::styled("Enter ", styles::status_bar_style()),
        Span::styled("send", send_style),
        Span::styled(
            format!(" · Ctrl+O connection · Ctrl+C quit  {length}/{MAX_MESSAGE_LENGTH}"),
            styles::status_bar_style(),
        ),
    ])
}
