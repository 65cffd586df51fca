//! Input widgets generated from argument types

use rand::RngCore;

use super::parser::parse_value;
use super::random::{random_value, RandomConfig};
use super::types::IdlType;
use super::value::IdlValue;

/// How a widget edits its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `null` and `reserved`: nothing to enter
    Fixed,
    /// `bool`: a checkbox
    Toggle,
    /// `text`: the buffer is the value, unquoted
    Text,
    /// Numeric types: the buffer holds a number
    Number,
    /// Everything else: the buffer holds a value literal
    Literal,
}

impl InputKind {
    fn for_type(ty: &IdlType) -> Self {
        match ty {
            IdlType::Null | IdlType::Reserved => InputKind::Fixed,
            IdlType::Bool => InputKind::Toggle,
            IdlType::Text => InputKind::Text,
            ty if ty.is_numeric() => InputKind::Number,
            _ => InputKind::Literal,
        }
    }
}

/// How [`InputWidget::parse`] obtains its value
pub enum ParseMode<'a> {
    /// Parse what the user typed
    Typed,
    /// Generate a random value and write its text into the widget
    Random {
        rng: &'a mut dyn RngCore,
        cfg: &'a RandomConfig,
    },
}

/// One argument input: an edit buffer plus its validation state
#[derive(Debug, Clone, PartialEq)]
pub struct InputWidget {
    pub ty: IdlType,
    pub kind: InputKind,
    buffer: String,
    /// Cursor position in characters
    cursor: usize,
    checked: bool,
    rejection: Option<String>,
}

/// Build the input widget for an argument type
pub fn render_input(ty: &IdlType) -> InputWidget {
    InputWidget {
        ty: ty.clone(),
        kind: InputKind::for_type(ty),
        buffer: String::new(),
        cursor: 0,
        checked: false,
        rejection: None,
    }
}

impl InputWidget {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Whether the widget takes keyboard text
    pub fn is_editable(&self) -> bool {
        matches!(
            self.kind,
            InputKind::Text | InputKind::Number | InputKind::Literal
        )
    }

    /// Produce a value, recording the rejection reason on failure
    pub fn parse(&mut self, mode: ParseMode<'_>) -> Option<IdlValue> {
        match mode {
            ParseMode::Typed => self.parse_typed(),
            ParseMode::Random { rng, cfg } => match random_value(&self.ty, rng, cfg) {
                Ok(value) => {
                    self.show(&value);
                    self.rejection = None;
                    Some(value)
                }
                Err(e) => {
                    self.rejection = Some(e.to_string());
                    None
                }
            },
        }
    }

    fn parse_typed(&mut self) -> Option<IdlValue> {
        let result = match self.kind {
            InputKind::Fixed => Ok(if self.ty == IdlType::Reserved {
                IdlValue::Reserved
            } else {
                IdlValue::Null
            }),
            InputKind::Toggle => Ok(IdlValue::Bool(self.checked)),
            InputKind::Text => Ok(IdlValue::Text(self.buffer.clone())),
            InputKind::Number | InputKind::Literal => {
                let src = self.buffer.trim();
                if src.is_empty() {
                    match self.ty {
                        IdlType::Opt(_) => Ok(IdlValue::none()),
                        _ => Err("required".to_string()),
                    }
                } else {
                    parse_value(&self.ty, src).map_err(|e| match e {
                        crate::Error::Parse { message, .. } => message,
                        other => other.to_string(),
                    })
                }
            }
        };

        match result {
            Ok(value) => {
                self.rejection = None;
                Some(value)
            }
            Err(reason) => {
                self.rejection = Some(reason);
                None
            }
        }
    }

    /// Write the textual form of a value into the widget
    pub fn show(&mut self, value: &IdlValue) {
        match (self.kind, value) {
            (InputKind::Toggle, IdlValue::Bool(b)) => self.checked = *b,
            (InputKind::Fixed, _) => {}
            (InputKind::Text, IdlValue::Text(s)) => self.set_text(s.clone()),
            (_, value) => self.set_text(value.to_string()),
        }
    }

    pub fn set_text(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.buffer = text;
        self.rejection = None;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) {
        if !self.is_editable() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
        self.rejection = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 || !self.is_editable() {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
        self.rejection = None;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.buffer.chars().count() || !self.is_editable() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
        self.rejection = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Flip a checkbox; no-op for other kinds
    pub fn toggle(&mut self) {
        if self.kind == InputKind::Toggle {
            self.checked = !self.checked;
            self.rejection = None;
        }
    }
}
