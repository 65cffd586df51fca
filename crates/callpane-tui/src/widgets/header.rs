//! Header bar widget
//!
//! Shows the interface name, the service and the main key bindings.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use callpane_app::AppPhase;
use callpane_core::sanitize_line;

use crate::theme::{palette, styles};

/// Main header: status dot, title and shortcut hints
pub struct MainHeader<'a> {
    title: &'a str,
    service: &'a str,
    phase: AppPhase,
    in_flight: usize,
}

impl<'a> MainHeader<'a> {
    pub fn new(title: &'a str, service: &'a str) -> Self {
        Self {
            title,
            service,
            phase: AppPhase::Loading,
            in_flight: 0,
        }
    }

    pub fn phase(mut self, phase: AppPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Number of calls still waiting for a reply
    pub fn in_flight(mut self, count: usize) -> Self {
        self.in_flight = count;
        self
    }

    fn status_dot(&self) -> (&'static str, Style) {
        match self.phase {
            AppPhase::Loading => ("○", styles::status_yellow()),
            AppPhase::Ready if self.in_flight > 0 => ("●", styles::status_yellow()),
            AppPhase::Ready => ("●", styles::status_green()),
            AppPhase::Failed => ("●", styles::status_red()),
            AppPhase::Quitting => ("○", styles::text_muted()),
        }
    }

    fn shortcuts() -> Line<'static> {
        let mut spans = Vec::new();
        for (key, label) in [
            ("^R", "Call"),
            ("^L", "Lucky"),
            ("^V", "View"),
            ("Tab", "Focus"),
            ("q", "Quit"),
        ] {
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!("] {}  ", label), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (dot, dot_style) = self.status_dot();
        let title = sanitize_line(self.title);
        let mut left = vec![
            Span::raw(" "),
            Span::styled(dot, dot_style),
            Span::raw(" "),
            Span::styled("Callpane", styles::accent_bold()),
        ];
        if !title.is_empty() {
            left.push(Span::styled(" / ", styles::text_muted()));
            left.push(Span::styled(title, styles::text_secondary()));
        }
        if self.in_flight > 0 {
            left.push(Span::styled(
                format!("  {} in flight", self.in_flight),
                Style::default().fg(palette::STATUS_YELLOW),
            ));
        }
        let left_line = Line::from(left);
        let left_width = left_line.width() as u16;
        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        // Key hints when there is room, otherwise the service label
        let shortcuts = Self::shortcuts();
        let shortcuts_width = shortcuts.width() as u16;
        if left_width + shortcuts_width + 2 <= inner.width {
            let x = inner.x + inner.width - shortcuts_width;
            buf.set_line(x, inner.y, &shortcuts, shortcuts_width);
            return;
        }

        let service = Line::from(Span::styled(
            format!("{} ", sanitize_line(self.service)),
            styles::text_muted(),
        ));
        let service_width = service.width() as u16;
        if left_width + service_width + 2 <= inner.width {
            let x = inner.x + inner.width - service_width;
            buf.set_line(x, inner.y, &service, service_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_renders_title() {
        let mut term = TestTerminal::with_size(100, 3);
        let header = MainHeader::new("calc", "demo").phase(AppPhase::Ready);
        term.render_widget(header, term.area());

        assert!(term.line_contains(1, "Callpane"));
        assert!(term.line_contains(1, "calc"));
        assert!(term.line_contains(1, "[q] Quit"));
    }

    #[test]
    fn test_header_shows_in_flight_count() {
        let mut term = TestTerminal::with_size(100, 3);
        let header = MainHeader::new("calc", "demo")
            .phase(AppPhase::Ready)
            .in_flight(2);
        term.render_widget(header, term.area());

        assert!(term.buffer_contains("2 in flight"));
    }

    #[test]
    fn test_narrow_header_falls_back_to_service_label() {
        let mut term = TestTerminal::with_size(40, 3);
        let header = MainHeader::new("calc", "demo").phase(AppPhase::Ready);
        term.render_widget(header, term.area());

        assert!(!term.buffer_contains("Quit"));
        assert!(term.buffer_contains("demo"));
    }

    #[test]
    fn test_header_strips_escapes_from_title() {
        let mut term = TestTerminal::with_size(100, 3);
        let header = MainHeader::new("\x1b[31mcalc\x1b[0m", "demo");
        term.render_widget(header, term.area());

        assert!(term.buffer_contains("calc"));
        assert!(!term.buffer_contains("[31m"));
    }
}
