//! Ink & saffron palette.
//!
//! Views take colours and styles from here; no inline `Color::*`.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Indigo ink: focused borders, section headings.
pub const INK: Color = Color::Rgb(0x5C, 0x6B, 0xC0);
/// Lighter ink for key names and the active view label.
pub const INK_LIGHT: Color = Color::Rgb(0x9F, 0xA8, 0xDA);
/// Saffron: headwords, selection, the brand badge.
pub const SAFFRON: Color = Color::Rgb(0xF4, 0xA2, 0x3C);

/// Raised panel background (active tab).
pub const BG_SURFACE: Color = Color::Rgb(0x1E, 0x1F, 0x2E);
/// Page background, used as badge foreground.
pub const BG_PAGE: Color = Color::Rgb(0x12, 0x12, 0x1C);

pub const TEXT: Color = Color::Rgb(0xEC, 0xE8, 0xE1);
pub const TEXT_MUTED: Color = Color::Rgb(0x8C, 0x88, 0x82);
pub const TEXT_FAINT: Color = Color::Rgb(0x55, 0x53, 0x5E);

pub const ERROR: Color = Color::Rgb(0xE5, 0x73, 0x73);
pub const SUCCESS: Color = Color::Rgb(0x81, 0xC7, 0x84);
pub const WARNING: Color = Color::Rgb(0xFF, 0xD5, 0x4F);
pub const INFO: Color = Color::Rgb(0x64, 0xB5, 0xF6);

/// Headwords and modal titles.
pub fn title() -> Style {
    Style::default().fg(SAFFRON).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(INK).add_modifier(Modifier::BOLD)
}

/// Selected list row.
pub fn highlight() -> Style {
    Style::default().fg(SAFFRON).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Footer hints such as `d:delete`.
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_FAINT)
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_PAGE)
        .bg(SAFFRON)
        .add_modifier(Modifier::BOLD)
}

/// Search input border: green once admitted, red once denied.
pub fn admission(valid: Option<bool>) -> Style {
    match valid {
        Some(true) => Style::default().fg(SUCCESS),
        Some(false) => Style::default().fg(ERROR),
        None => Style::default().fg(INK),
    }
}

/// Colour of a revealed quiz option.
pub fn answer(correct: bool) -> Style {
    let color = if correct { SUCCESS } else { ERROR };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Bordered panel that owns keyboard input.
pub fn block_focused(title: &str) -> Block<'_> {
    panel(title, Style::default().fg(INK))
}

/// Bordered panel for read-only content.
pub fn block_default(title: &str) -> Block<'_> {
    panel(title, Style::default().fg(TEXT_FAINT))
}

fn panel(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border)
}
