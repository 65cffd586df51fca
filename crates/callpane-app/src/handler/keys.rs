//! Key event handlers per application phase

use crate::form::FormFocus;
use crate::input_key::InputKey;
use crate::message::{EditOp, Message};
use crate::state::{AppPhase, AppState};

/// Convert key events to messages based on the current phase
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.phase {
        AppPhase::Loading | AppPhase::Failed => handle_key_waiting(key),
        AppPhase::Ready => handle_key_ready(state, key),
        AppPhase::Quitting => None,
    }
}

/// Loading screen and failure screen: only quitting does anything
fn handle_key_waiting(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),
        _ => None,
    }
}

fn handle_key_ready(state: &AppState, key: InputKey) -> Option<Message> {
    let method = state.selected;

    // Bindings that work whatever has focus
    match key {
        InputKey::CharCtrl('c') => return Some(Message::Quit),
        InputKey::CharCtrl('r') => {
            return Some(Message::Invoke {
                method,
                random: false,
            })
        }
        InputKey::CharCtrl('l') => {
            return Some(Message::Invoke {
                method,
                random: true,
            })
        }
        InputKey::CharCtrl('v') => return Some(Message::CycleResultView { method }),
        InputKey::Up => return Some(Message::SelectPrevious),
        InputKey::Down => return Some(Message::SelectNext),
        InputKey::Tab => return Some(Message::FocusNext),
        InputKey::BackTab => return Some(Message::FocusPrevious),
        InputKey::PageUp => return Some(Message::PageUp),
        InputKey::PageDown => return Some(Message::PageDown),
        InputKey::Enter => return Some(Message::Activate),
        _ => {}
    }

    if state.is_editing() {
        return handle_key_editing(method, key);
    }

    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),
        InputKey::Char('v') => Some(Message::CycleResultView { method }),
        InputKey::Char('j') => Some(Message::SelectNext),
        InputKey::Char('k') => Some(Message::SelectPrevious),
        InputKey::Char('g') | InputKey::Home => Some(Message::ScrollToTop),
        InputKey::Char('G') | InputKey::End => Some(Message::ScrollToBottom),
        InputKey::Char(' ') => Some(Message::Activate),
        _ => None,
    }
}

/// A text, number or literal input has focus
fn handle_key_editing(method: usize, key: InputKey) -> Option<Message> {
    let op = match key {
        InputKey::Char(c) => EditOp::Insert(c),
        InputKey::Backspace => EditOp::Backspace,
        InputKey::Delete => EditOp::Delete,
        InputKey::Left => EditOp::Left,
        InputKey::Right => EditOp::Right,
        InputKey::Home => EditOp::Home,
        InputKey::End => EditOp::End,
        // Leave the input; a second Esc quits
        InputKey::Esc => {
            return Some(Message::Focus {
                method,
                focus: FormFocus::Invoke,
            })
        }
        _ => return None,
    };
    Some(Message::Edit(op))
}
