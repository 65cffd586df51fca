//! Console widget: the scrollable log of completed calls

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

use callpane_app::{Console, ConsoleKind, ConsoleViewState};
use callpane_core::display_lines;

use crate::theme::{palette, styles};

/// Width of the `HH:MM:SS ` prefix
const TIME_WIDTH: usize = 9;

pub struct ConsoleView<'a> {
    console: &'a Console,
    show_timestamps: bool,
}

impl<'a> ConsoleView<'a> {
    pub fn new(console: &'a Console) -> Self {
        Self {
            console,
            show_timestamps: true,
        }
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for entry in self.console.entries() {
            let style = match entry.kind {
                ConsoleKind::Call => Style::default().fg(palette::CONSOLE_CALL),
                ConsoleKind::Result => Style::default().fg(palette::CONSOLE_RESULT),
            };
            for (i, text) in display_lines(&entry.text).into_iter().enumerate() {
                let mut spans = Vec::with_capacity(2);
                if self.show_timestamps {
                    let prefix = if i == 0 && entry.kind == ConsoleKind::Call {
                        entry.timestamp.format("%H:%M:%S ").to_string()
                    } else {
                        " ".repeat(TIME_WIDTH)
                    };
                    spans.push(Span::styled(
                        prefix,
                        Style::default().fg(palette::CONSOLE_TIME),
                    ));
                }
                spans.push(Span::styled(text, style));
                lines.push(Line::from(spans));
            }
        }
        lines
    }
}

impl StatefulWidget for ConsoleView<'_> {
    type State = ConsoleViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ConsoleViewState) {
        let title = format!(" Console ({}) ", self.console.len());
        let block = styles::glass_block(false).title(Span::styled(title, styles::text_secondary()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.lines();
        state.update_content_size(lines.len(), inner.height as usize);
        let (start, end) = state.visible_range();

        if lines.is_empty() {
            let hint = Line::from(Span::styled(
                " Completed calls appear here",
                styles::text_muted(),
            ));
            buf.set_line(inner.x, inner.y, &hint, inner.width);
            return;
        }

        for (line, y) in lines[start..end].iter().zip(inner.y..) {
            buf.set_line(inner.x, y, line, inner.width);
        }

        if lines.len() > inner.height as usize {
            let mut scrollbar_state =
                ScrollbarState::new(lines.len().saturating_sub(inner.height as usize))
                    .position(state.offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(area, buf, &mut scrollbar_state);
        }
    }
}
