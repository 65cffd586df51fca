//! Terminal event polling

use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use callpane_app::message::Message;
use callpane_app::InputKey;
use callpane_core::prelude::*;
use std::time::Duration;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Convert a mouse event to a message: left clicks and the wheel
pub fn mouse_event_to_message(mouse: MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::ScrollUp => Some(Message::ScrollUp),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown),
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    // 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        let message = match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                key_event_to_input(key).map(Message::Key)
            }
            Event::Mouse(mouse) => mouse_event_to_message(mouse),
            _ => None,
        };
        Ok(message)
    } else {
        Ok(Some(Message::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_char_with_ctrl_conversion() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('r')));
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(InputKey::Backspace)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)),
            Some(InputKey::Delete)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE)),
            Some(InputKey::Home)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::End, KeyModifiers::NONE)),
            Some(InputKey::End)
        );
    }

    #[test]
    fn test_backtab_with_shift() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
    }

    #[test]
    fn test_uppercase_letters() {
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('G')));
    }

    #[test]
    fn test_unsupported_key_returns_none() {
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
    }

    #[test]
    fn test_left_click_becomes_click_message() {
        let msg = mouse_event_to_message(mouse(MouseEventKind::Down(MouseButton::Left), 12, 7));
        assert!(matches!(msg, Some(Message::Click { column: 12, row: 7 })));
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        assert!(mouse_event_to_message(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)).is_none());
        assert!(mouse_event_to_message(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1)).is_none());
        assert!(mouse_event_to_message(mouse(MouseEventKind::Moved, 1, 1)).is_none());
    }

    #[test]
    fn test_wheel_scrolls_console() {
        assert!(matches!(
            mouse_event_to_message(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(Message::ScrollUp)
        ));
        assert!(matches!(
            mouse_event_to_message(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(Message::ScrollDown)
        ));
    }
}
