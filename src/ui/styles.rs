//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Window chrome
// =============================================================================

/// Border of the window receiving input.
pub fn active_window_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border of windows below the active one, or of any window while a dialog is open.
pub fn inactive_window_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn window_title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the key hints in the status bar.
pub fn status_bar_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Input fields
// =============================================================================

/// Style for the "> " prompt.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for placeholder text shown while the field is empty.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn field_label_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn focused_field_label_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn invalid_field_style() -> Style {
    Style::default().fg(Color::Red)
}

// =============================================================================
// Commands
// =============================================================================

pub fn command_enabled_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn command_disabled_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Dialogs
// =============================================================================

pub fn info_dialog_border_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn error_dialog_border_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for the timestamp line under the dialog message.
pub fn dialog_timestamp_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
