//! Geometry helpers for placing cards on the terminal grid.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Largest card the deck area will draw, in cells.
pub const MAX_CARD_WIDTH: u16 = 52;
pub const MAX_CARD_HEIGHT: u16 = 18;

/// Rotation, in degrees, below which the card is drawn upright.
const UPRIGHT_DEGREES: f32 = 1.0;

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Resting position of the top card inside the deck area.
pub fn card_rect(area: Rect) -> Rect {
    let width = (area.width.saturating_mul(9) / 10).min(MAX_CARD_WIDTH);
    let height = area.height.saturating_sub(2).min(MAX_CARD_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Shrinks `rect` about its center.
pub fn scale_rect(rect: Rect, scale: f32) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = (rect.width as f32 * scale).round() as u16;
    let height = (rect.height as f32 * scale).round() as u16;
    Rect {
        x: rect.x + (rect.width - width) / 2,
        y: rect.y + (rect.height - height) / 2,
        width,
        height,
    }
}

/// Moves `rect` by a fractional cell offset and clips it to `bounds`.
/// Returns `None` once the card has left `bounds` entirely.
pub fn translate_rect(rect: Rect, dx: f32, dy: f32, bounds: Rect) -> Option<Rect> {
    let left = rect.x as f32 + dx.round();
    let top = rect.y as f32 + dy.round();
    let right = left + rect.width as f32;
    let bottom = top + rect.height as f32;

    let clip_left = left.max(bounds.left() as f32);
    let clip_top = top.max(bounds.top() as f32);
    let clip_right = right.min(bounds.right() as f32);
    let clip_bottom = bottom.min(bounds.bottom() as f32);

    if clip_right <= clip_left || clip_bottom <= clip_top {
        return None;
    }

    Some(Rect {
        x: clip_left as u16,
        y: clip_top as u16,
        width: (clip_right - clip_left) as u16,
        height: (clip_bottom - clip_top) as u16,
    })
}

/// How strongly the LIKE/NOPE stamp shows, from 0 at rest to 1 at the
/// commit threshold.
pub fn stamp_strength(translate_x: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (translate_x.abs() / threshold).min(1.0)
}

/// Glyph hinting at the card's tilt, since cells can't rotate.
pub fn tilt_glyph(rotation_degrees: f32) -> &'static str {
    if rotation_degrees > UPRIGHT_DEGREES {
        "⟋"
    } else if rotation_degrees < -UPRIGHT_DEGREES {
        "⟍"
    } else {
        "│"
    }
}

/// Share of the deck already behind the current card.
pub fn calculate_progress(current_index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (current_index.min(total) as f64) / total as f64
}
