pub mod snap;

pub use snap::{
    KeyboardSnap, NormRect, SNAP_ZONES, ScreenSize, SnapDirection, SnapPosition, SnapResult,
    SnapZone, bounds_for, detect_edge_snap, detect_snap, detect_zone, is_maximize_gesture,
    keyboard_snap,
};

use ratatui::prelude::Rect;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Intersection of `area` and `bounds`, or an empty rect when they are disjoint.
pub fn clamp_rect(area: Rect, bounds: Rect) -> Rect {
    let x0 = area.x.max(bounds.x);
    let y0 = area.y.max(bounds.y);
    let x1 = area
        .x
        .saturating_add(area.width)
        .min(bounds.x.saturating_add(bounds.width));
    let y1 = area
        .y
        .saturating_add(area.height)
        .min(bounds.y.saturating_add(bounds.height));
    if x1 <= x0 || y1 <= y0 {
        return Rect::default();
    }
    Rect {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}
