//! Root layout: tab bar, main content, status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// View tabs (top row).
    pub tabs: Rect,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        AppLayout {
            tabs: rows[0],
            main: rows[1],
            status: rows[2],
        }
    }
}

/// Helper: centered rectangle with percentage width/height.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
