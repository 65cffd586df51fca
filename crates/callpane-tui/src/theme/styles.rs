//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Key names in hints
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for the focused control of the selected card
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Form controls ---
pub fn input_field(focused: bool, rejected: bool) -> Style {
    let style = Style::default().bg(palette::INPUT_BG);
    match (focused, rejected) {
        (_, true) => style.fg(palette::STATUS_RED),
        (true, false) => style.fg(palette::TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        (false, false) => style.fg(palette::TEXT_SECONDARY),
    }
}

pub fn cursor() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::TEXT_PRIMARY)
}

pub fn button(focused: bool) -> Style {
    if focused {
        focused_selected()
    } else {
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(palette::BUTTON_BG)
    }
}

pub fn lucky_button(focused: bool) -> Style {
    if focused {
        focused_selected()
    } else {
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(palette::LUCKY_BG)
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
        .style(Style::default().bg(palette::CARD_BG))
}
