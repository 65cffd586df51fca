//! Message types for the application (TEA pattern)

use callpane_core::{IdlValue, ServiceInterface};

use crate::form::FormFocus;
use crate::input_key::InputKey;
use crate::invoker::CallResult;

/// An edit applied to the focused input widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Flip a checkbox
    Toggle,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Left mouse click at a terminal cell
    Click { column: u16, row: u16 },

    /// Tick for periodic redraws
    Tick,

    /// Quit immediately
    Quit,

    /// Quit requested by the user
    RequestQuit,

    // ─────────────────────────────────────────────────────────
    // Interface Enumeration
    // ─────────────────────────────────────────────────────────
    /// The service's method list arrived
    InterfaceLoaded(ServiceInterface),

    /// Fetching the method list failed
    InterfaceFailed(String),

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    SelectNext,
    SelectPrevious,
    SelectMethod(usize),

    /// Move focus to the next control of the selected form
    FocusNext,
    /// Move focus to the previous control of the selected form
    FocusPrevious,
    /// Focus a control of a specific form
    Focus { method: usize, focus: FormFocus },

    /// Edit the focused input of the selected form
    Edit(EditOp),

    /// Activate whatever the selected form has focused
    Activate,

    // ─────────────────────────────────────────────────────────
    // Calls
    // ─────────────────────────────────────────────────────────
    /// Collect the form's arguments and call the method.
    /// `random` fills every input with a random value first.
    Invoke { method: usize, random: bool },

    /// A call finished, successfully or not
    CallFinished {
        method: usize,
        args: Vec<IdlValue>,
        outcome: Result<CallResult, String>,
    },

    /// Advance the result pane to its next view
    CycleResultView { method: usize },

    // ─────────────────────────────────────────────────────────
    // Console Scrolling
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,
}
