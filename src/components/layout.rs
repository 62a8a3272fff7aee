//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub stack: Rect,
    pub history: Rect,
    pub log: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Popup for the modal at `depth`, shifted down-right so the stack shows
pub fn stacked_popup(area: Rect, width: u16, height: u16, depth: usize) -> Rect {
    let base = centered_popup(area, width, height);
    let shift = (depth.min(6) as u16) * 2;
    let x = (base.x + shift).min(area.right().saturating_sub(base.width));
    let y = (base.y + shift / 2).min(area.bottom().saturating_sub(base.height));
    Rect::new(x, y, base.width, base.height)
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    // Main vertical layout: content + log + (optional status) + help bar
    let main_chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(8),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(8),
                Constraint::Length(3),
            ])
            .split(area)
    };

    // Horizontal split: modal stack (40%) and session history (60%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[0]);

    let (status_area, help_area) = if has_status {
        (Some(main_chunks[2]), main_chunks[3])
    } else {
        (None, main_chunks[2])
    };

    MainLayout {
        stack: content_chunks[0],
        history: content_chunks[1],
        log: main_chunks[1],
        status: status_area,
        help: help_area,
    }
}
