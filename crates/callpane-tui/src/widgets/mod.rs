//! Custom widget components

mod console_view;
mod header;
mod method_card;
mod result_pane;

pub use console_view::ConsoleView;
pub use header::MainHeader;
pub use method_card::MethodCard;
pub use result_pane::result_rows;

use ratatui::text::Line;

use callpane_app::HitTarget;

/// One line of a method card and the click targets on it
#[derive(Debug, Clone)]
pub struct CardRow {
    pub line: Line<'static>,
    /// `(x offset, width, target)`; a width of `u16::MAX` spans the row
    pub targets: Vec<(u16, u16, HitTarget)>,
}

impl CardRow {
    pub fn new(line: Line<'static>) -> Self {
        Self {
            line,
            targets: Vec::new(),
        }
    }

    /// Make the whole row clickable
    pub fn target(mut self, target: HitTarget) -> Self {
        self.targets.push((0, u16::MAX, target));
        self
    }

    pub fn target_span(mut self, x: u16, width: u16, target: HitTarget) -> Self {
        self.targets.push((x, width, target));
        self
    }
}
