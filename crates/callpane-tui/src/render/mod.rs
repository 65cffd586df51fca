//! Main render/view function (View in TEA pattern)


use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use callpane_app::{AppPhase, AppState};
use callpane_core::{display_lines, sanitize_line};

use super::{layout, widgets};
use crate::theme::{palette, styles};

/// Render the complete UI (View function in TEA)
///
/// Only render bookkeeping is written back to the state: the hit map of
/// this frame, the first visible method card and the console scroll size.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, state.settings.ui.console_height);
    state.hit_map.clear();

    let header = widgets::MainHeader::new(state.title(), &state.service_label)
        .phase(state.phase)
        .in_flight(state.in_flight);
    frame.render_widget(header, areas.header);

    match state.phase {
        AppPhase::Loading => render_loading_screen(frame, state, areas.methods),
        AppPhase::Failed => render_failure_screen(frame, state, areas.methods),
        AppPhase::Ready | AppPhase::Quitting => render_methods(frame, state, areas.methods),
    }

    let console = widgets::ConsoleView::new(&state.console);
    frame.render_stateful_widget(console, areas.console, &mut state.console_view);
}

/// Draw the method cards, scrolled so the selected card is visible
fn render_methods(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let AppState {
        methods,
        selected,
        methods_scroll,
        hit_map,
        settings,
        ..
    } = state;

    if methods.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " This service has no methods.",
            styles::text_muted(),
        )));
        frame.render_widget(empty, area);
        return;
    }

    let cards: Vec<_> = methods
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            widgets::MethodCard::new(entry, i)
                .selected(i == *selected)
                .max_result_lines(settings.ui.result_max_lines)
        })
        .collect();
    let heights: Vec<u16> = cards.iter().map(|card| card.height(area.width)).collect();
    *methods_scroll = scroll_to_show(&heights, *selected, *methods_scroll, area.height);

    let bottom = area.y + area.height;
    let mut y = area.y;
    for (i, card) in cards.into_iter().enumerate().skip(*methods_scroll) {
        if y >= bottom {
            break;
        }
        let height = heights[i].min(bottom - y);
        frame.render_stateful_widget(card, Rect::new(area.x, y, area.width, height), hit_map);
        y += height;
    }
}

/// First card to draw so that the selected card fits below it
///
/// Keeps the previous scroll position when it already works. A selected
/// card taller than the pane is drawn from its top.
pub fn scroll_to_show(heights: &[u16], selected: usize, scroll: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    let mut scroll = scroll.min(selected);
    while scroll < selected
        && heights[scroll..=selected]
            .iter()
            .map(|&h| u32::from(h))
            .sum::<u32>()
            > u32::from(available)
    {
        scroll += 1;
    }
    scroll
}

/// Centered box in the method pane
fn centered_box(area: Rect, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage(10),
        Constraint::Percentage(80),
        Constraint::Percentage(10),
    ])
    .areas(middle);
    center
}

fn render_loading_screen(frame: &mut Frame, state: &AppState, area: Rect) {
    let center = centered_box(area, 5);
    frame.render_widget(Clear, center);

    let lines = vec![
        Line::from(Span::styled("Callpane", styles::accent_bold())),
        Line::from(vec![
            Span::styled("Loading interface of ", styles::text_secondary()),
            Span::styled(sanitize_line(&state.service_label), styles::text_primary()),
            Span::styled("...", styles::text_secondary()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_inactive())
        .style(Style::default().bg(palette::DEEPEST_BG));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        center,
    );
}

fn render_failure_screen(frame: &mut Frame, state: &AppState, area: Rect) {
    let reason = state.load_error.as_deref().unwrap_or("unknown error");
    let reason_lines = display_lines(reason);
    let height = u16::try_from(reason_lines.len() + 5).unwrap_or(u16::MAX);
    let center = centered_box(area, height);
    frame.render_widget(Clear, center);

    let mut lines = vec![Line::from(Span::styled(
        "Could not load the interface",
        styles::status_red(),
    ))];
    lines.push(Line::from(""));
    lines.extend(
        reason_lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, styles::text_primary()))),
    );
    lines.push(Line::from(vec![
        Span::styled("Press ", styles::text_muted()),
        Span::styled("q", styles::keybinding()),
        Span::styled(" to quit", styles::text_muted()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::status_red())
        .style(Style::default().bg(palette::DEEPEST_BG));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        center,
    );
}
