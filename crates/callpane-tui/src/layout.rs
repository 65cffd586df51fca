//! Screen layout definitions for the TUI
//!
//! Header on top, method cards in the middle, console at the bottom.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the header container
pub const HEADER_HEIGHT: u16 = 3;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, service and key hints
    pub header: Rect,

    /// Method cards
    pub methods: Rect,

    /// Console log of completed calls
    pub console: Rect,
}

/// Create the main screen layout
///
/// # Arguments
/// * `area` - Total screen area
/// * `console_height` - Requested console height, borders included
pub fn create(area: Rect, console_height: u16) -> ScreenAreas {
    // The method pane keeps at least 3 rows; the console gives way first
    let available = area.height.saturating_sub(HEADER_HEIGHT + 3);
    let console_height = console_height.min(available);

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(console_height),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        methods: chunks[1],
        console: chunks[2],
    }
}
