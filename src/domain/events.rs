#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Ctrl(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Tab,
    Enter,
    Esc,
}

impl KeyInput {
    /// Keys that close the front dialog.
    pub fn dismisses_dialog(self) -> bool {
        matches!(self, Self::Enter | Self::Esc)
    }
}
