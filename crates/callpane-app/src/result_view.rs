//! Result panes and their three alternate views

use std::time::Duration;

use callpane_core::{
    display_lines, format_returns, render_output, render_value, DisplayWidget, IdlType,
};

use crate::invoker::CallResult;

/// Which rendering of a result is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultView {
    /// Canonical value text
    #[default]
    Text,
    /// Tree laid out along the declared types
    Structured,
    /// The reply as received, as JSON
    Raw,
}

impl ResultView {
    /// The view after this one; wraps around after `Raw`
    pub fn next(self) -> Self {
        match self {
            ResultView::Text => ResultView::Structured,
            ResultView::Structured => ResultView::Raw,
            ResultView::Raw => ResultView::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResultView::Text => "Text",
            ResultView::Structured => "Structured",
            ResultView::Raw => "Raw",
        }
    }
}

/// All three renderings of one result
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    /// Display rows of the text view
    pub text: Vec<String>,
    /// One display widget per return value
    pub structured: Vec<DisplayWidget>,
    /// Display rows of the raw view
    pub raw: Vec<String>,
    pub view: ResultView,
    pub elapsed: Duration,
}

impl RenderedResult {
    /// Build every view of `result`, starting at [`ResultView::Text`]
    pub fn new(result: &CallResult, rets: &[IdlType], text_width: usize) -> Self {
        let text = display_lines(&format_returns(&result.values, text_width));

        let structured = rets
            .iter()
            .zip(&result.values)
            .map(|(ty, value)| {
                let mut widget = render_output(ty);
                render_value(ty, &mut widget, value);
                widget
            })
            .collect();

        let raw_json = serde_json::to_string_pretty(&result.raw.to_json())
            .unwrap_or_else(|_| result.raw.to_json().to_string());

        Self {
            text,
            structured,
            raw: display_lines(&raw_json),
            view: ResultView::Text,
            elapsed: result.elapsed,
        }
    }

    /// The canonical text, one string
    pub fn text_joined(&self) -> String {
        self.text.join("\n")
    }
}

/// The result area of one method
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultPane {
    /// Never invoked
    #[default]
    Hidden,
    /// A call is in flight
    Waiting,
    /// The last call succeeded
    Ready(RenderedResult),
    /// The last call failed with this message
    Failed(String),
}

impl ResultPane {
    /// Advance to the next view; returns false when there is nothing to cycle
    pub fn cycle(&mut self) -> bool {
        match self {
            ResultPane::Ready(rendered) => {
                rendered.view = rendered.view.next();
                true
            }
            _ => false,
        }
    }

    /// The visible view, if there are views
    pub fn view(&self) -> Option<ResultView> {
        match self {
            ResultPane::Ready(rendered) => Some(rendered.view),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultPane::Hidden)
    }
}
