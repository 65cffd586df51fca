//! Console log - a bounded transcript of successful calls plus the scroll
//! state of the pane showing it.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use callpane_core::display_lines;

/// What a console entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKind {
    /// `› name(args)`
    Call,
    /// The formatted result of the call above it
    Result,
}

/// One entry of the console
#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    pub timestamp: DateTime<Local>,
    pub kind: ConsoleKind,
    pub text: String,
}

/// Bounded console; the oldest entries are evicted first
#[derive(Debug, Clone)]
pub struct Console {
    entries: VecDeque<ConsoleEntry>,
    capacity: usize,
}

impl Console {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append an entry at the bottom
    ///
    /// An evicted call takes its result with it, so the console never
    /// starts with a result whose call is gone.
    pub fn append(&mut self, kind: ConsoleKind, text: impl Into<String>) {
        if self.entries.len() >= self.capacity {
            let evicted = self.entries.pop_front();
            let orphaned = self
                .entries
                .front()
                .is_some_and(|entry| entry.kind == ConsoleKind::Result);
            if matches!(evicted, Some(ConsoleEntry { kind: ConsoleKind::Call, .. })) && orphaned {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(ConsoleEntry {
            timestamp: Local::now(),
            kind,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &VecDeque<ConsoleEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Display rows of every entry, oldest first
    pub fn lines(&self) -> Vec<(ConsoleKind, String)> {
        self.entries
            .iter()
            .flat_map(|entry| {
                display_lines(&entry.text)
                    .into_iter()
                    .map(move |line| (entry.kind, line))
            })
            .collect()
    }
}

/// Scroll position of the console pane
#[derive(Debug, Clone)]
pub struct ConsoleViewState {
    /// Current vertical scroll offset from top
    pub offset: usize,
    /// Follow new content
    pub auto_scroll: bool,
    /// Total number of lines (set during render)
    pub total_lines: usize,
    /// Visible lines (set during render)
    pub visible_lines: usize,
}

impl Default for ConsoleViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleViewState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
            total_lines: 0,
            visible_lines: 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
        self.auto_scroll = self.offset >= self.max_offset();
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + n).min(max_offset);

        // Re-enable auto-scroll if at bottom
        if self.offset >= max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = self.max_offset() == 0;
    }

    /// Scroll to bottom and enable auto-scroll
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_scroll = true;
    }

    pub fn page_up(&mut self) {
        let page = self.visible_lines.saturating_sub(1).max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_lines.saturating_sub(1).max(1);
        self.scroll_down(page);
    }

    /// Update with new content size
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_lines = total;
        self.visible_lines = visible;

        if self.auto_scroll {
            self.offset = self.max_offset();
        } else {
            // Clamp if content shrank through eviction
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Range of line indices to draw
    pub fn visible_range(&self) -> (usize, usize) {
        let end = (self.offset + self.visible_lines).min(self.total_lines);
        (self.offset.min(end), end)
    }
}
