//! Keyboard input, independent of the terminal library.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the update loop (and the headless runner) never depends on crossterm.

/// A key press as seen by the update loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held (Ctrl+r, Ctrl+c, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Whether this key types a character into an edit buffer
    pub fn is_text(&self) -> bool {
        matches!(self, InputKey::Char(_))
    }
}
