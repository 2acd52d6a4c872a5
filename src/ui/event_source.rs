use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

pub struct CrosstermEventSource {
    poll_timeout: Duration,
}

impl CrosstermEventSource {
    /// `poll_timeout` is how long to wait for input before yielding a tick.
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }
}

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            Event::Resize(..) => Ok(Some(AppEvent::Tick)),
            _ => Ok(None),
        }
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let input = match key.code {
        KeyCode::Char('c') if ctrl => return Some(AppEvent::QuitRequested),
        KeyCode::Char(ch) if ctrl => KeyInput::Ctrl(ch.to_ascii_lowercase()),
        KeyCode::Char(ch) => KeyInput::Char(ch),
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        KeyCode::Tab => KeyInput::Tab,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Esc => KeyInput::Esc,
        _ => return None,
    };

    Some(AppEvent::InputKey(input))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
