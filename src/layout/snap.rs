//! Snap geometry engine.
//!
//! Pure functions over a screen size: target bounds for a snap position,
//! edge-proximity and zone detection for drag gestures, and the keyboard
//! snapping transitions. Nothing here touches window state; callers feed the
//! returned [`SnapResult`] into the registry themselves.
//!
//! A degenerate screen (zero or negative width or height) makes every query
//! answer "no snap".

use ratatui::prelude::Rect;

use crate::constants::{SNAP_ZONE_LOWER_BAND, SNAP_ZONE_UPPER_BAND};
use crate::window::{Point, WindowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapPosition {
    LeftHalf,
    RightHalf,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Full,
    Top,
    Bottom,
}

impl SnapPosition {
    pub const ALL: [SnapPosition; 6] = [
        SnapPosition::LeftHalf,
        SnapPosition::RightHalf,
        SnapPosition::TopLeft,
        SnapPosition::TopRight,
        SnapPosition::BottomLeft,
        SnapPosition::BottomRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SnapPosition::LeftHalf => "left half",
            SnapPosition::RightHalf => "right half",
            SnapPosition::TopLeft => "top left",
            SnapPosition::TopRight => "top right",
            SnapPosition::BottomLeft => "bottom left",
            SnapPosition::BottomRight => "bottom right",
        }
    }

    pub fn is_left(self) -> bool {
        matches!(
            self,
            SnapPosition::LeftHalf | SnapPosition::TopLeft | SnapPosition::BottomLeft
        )
    }

    pub fn is_quadrant(self) -> bool {
        !matches!(self, SnapPosition::LeftHalf | SnapPosition::RightHalf)
    }

    fn band(self) -> Band {
        match self {
            SnapPosition::LeftHalf | SnapPosition::RightHalf => Band::Full,
            SnapPosition::TopLeft | SnapPosition::TopRight => Band::Top,
            SnapPosition::BottomLeft | SnapPosition::BottomRight => Band::Bottom,
        }
    }

    fn from_parts(left: bool, band: Band) -> Self {
        match (left, band) {
            (true, Band::Full) => SnapPosition::LeftHalf,
            (false, Band::Full) => SnapPosition::RightHalf,
            (true, Band::Top) => SnapPosition::TopLeft,
            (false, Band::Top) => SnapPosition::TopRight,
            (true, Band::Bottom) => SnapPosition::BottomLeft,
            (false, Band::Bottom) => SnapPosition::BottomRight,
        }
    }
}

/// Screen size in logical units as pushed by the layout system.
///
/// Kept signed so a bogus measurement can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The screen as a rect at the origin; `None` when degenerate.
    /// Dimensions beyond `u16::MAX` saturate.
    pub fn area(&self) -> Option<Rect> {
        if self.is_degenerate() {
            return None;
        }
        Some(Rect {
            x: 0,
            y: 0,
            width: self.width.min(u16::MAX as i32) as u16,
            height: self.height.min(u16::MAX as i32) as u16,
        })
    }
}

impl From<Rect> for ScreenSize {
    fn from(rect: Rect) -> Self {
        Self {
            width: rect.width as i32,
            height: rect.height as i32,
        }
    }
}

/// Target rectangle for `position`.
///
/// Both halves, or all four quadrants, tile the screen exactly; on odd
/// dimensions the right and bottom tiles take the extra unit.
pub fn bounds_for(position: SnapPosition, screen: ScreenSize) -> Option<Rect> {
    let area = screen.area()?;
    let left_width = area.width / 2;
    let top_height = area.height / 2;
    let (x, width) = if position.is_left() {
        (area.x, left_width)
    } else {
        (area.x + left_width, area.width - left_width)
    };
    let (y, height) = match position.band() {
        Band::Full => (area.y, area.height),
        Band::Top => (area.y, top_height),
        Band::Bottom => (area.y + top_height, area.height - top_height),
    };
    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapResult {
    NoSnap,
    EdgeSnap(SnapPosition),
    ZoneSnap(SnapPosition),
}

impl SnapResult {
    pub fn position(self) -> Option<SnapPosition> {
        match self {
            SnapResult::NoSnap => None,
            SnapResult::EdgeSnap(position) | SnapResult::ZoneSnap(position) => Some(position),
        }
    }
}

fn pointer_on_screen(pointer: Point, area: Rect) -> bool {
    pointer.x >= 0
        && pointer.y >= 0
        && pointer.x < area.width as i32
        && pointer.y < area.height as i32
}

/// True when the pointer sits within `sensitivity` of the top edge, the
/// gesture reserved for maximize.
pub fn is_maximize_gesture(pointer: Point, screen: ScreenSize, sensitivity: i32) -> bool {
    let Some(area) = screen.area() else {
        return false;
    };
    sensitivity > 0 && pointer_on_screen(pointer, area) && pointer.y < sensitivity
}

/// Quadrant snap for a pointer near the left or right edge.
///
/// The top edge is checked first and never produces a snap, so a pointer in
/// a top corner stays free for the maximize gesture.
pub fn detect_edge_snap(pointer: Point, screen: ScreenSize, sensitivity: i32) -> SnapResult {
    let Some(area) = screen.area() else {
        return SnapResult::NoSnap;
    };
    if sensitivity <= 0 || !pointer_on_screen(pointer, area) {
        return SnapResult::NoSnap;
    }
    if pointer.y < sensitivity {
        return SnapResult::NoSnap;
    }
    let width = area.width as i32;
    let band = if pointer.y < area.height as i32 / 2 {
        Band::Top
    } else {
        Band::Bottom
    };
    if pointer.x < sensitivity {
        SnapResult::EdgeSnap(SnapPosition::from_parts(true, band))
    } else if pointer.x >= width - sensitivity {
        SnapResult::EdgeSnap(SnapPosition::from_parts(false, band))
    } else {
        SnapResult::NoSnap
    }
}

/// Normalized rectangle over the unit square.
///
/// Edges are half-open except where they touch 1.0, so adjacent rectangles
/// never share a point and the far edges of the square stay covered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl NormRect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let within = |v: f32, lo: f32, hi: f32| v >= lo && (v < hi || (hi >= 1.0 && v <= 1.0));
        within(x, self.left, self.right) && within(y, self.top, self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapZone {
    pub id: &'static str,
    pub position: SnapPosition,
    pub rect: NormRect,
}

/// The six drag zones. Quadrants own the upper and lower bands, halves own
/// the middle band; every point of the unit square lies in exactly one zone.
pub const SNAP_ZONES: [SnapZone; 6] = [
    SnapZone {
        id: "top-left",
        position: SnapPosition::TopLeft,
        rect: NormRect::new(0.0, 0.0, 0.5, SNAP_ZONE_UPPER_BAND),
    },
    SnapZone {
        id: "top-right",
        position: SnapPosition::TopRight,
        rect: NormRect::new(0.5, 0.0, 1.0, SNAP_ZONE_UPPER_BAND),
    },
    SnapZone {
        id: "left-half",
        position: SnapPosition::LeftHalf,
        rect: NormRect::new(0.0, SNAP_ZONE_UPPER_BAND, 0.5, SNAP_ZONE_LOWER_BAND),
    },
    SnapZone {
        id: "right-half",
        position: SnapPosition::RightHalf,
        rect: NormRect::new(0.5, SNAP_ZONE_UPPER_BAND, 1.0, SNAP_ZONE_LOWER_BAND),
    },
    SnapZone {
        id: "bottom-left",
        position: SnapPosition::BottomLeft,
        rect: NormRect::new(0.0, SNAP_ZONE_LOWER_BAND, 0.5, 1.0),
    },
    SnapZone {
        id: "bottom-right",
        position: SnapPosition::BottomRight,
        rect: NormRect::new(0.5, SNAP_ZONE_LOWER_BAND, 1.0, 1.0),
    },
];

pub fn detect_zone(pointer: Point, screen: ScreenSize) -> Option<&'static SnapZone> {
    let area = screen.area()?;
    let nx = pointer.x as f32 / area.width as f32;
    let ny = pointer.y as f32 / area.height as f32;
    if !(0.0..=1.0).contains(&nx) || !(0.0..=1.0).contains(&ny) {
        return None;
    }
    SNAP_ZONES.iter().find(|zone| zone.rect.contains(nx, ny))
}

/// Snap decision for one drag sample: the maximize reservation wins, then
/// edge proximity, then (when enabled) the zone table.
pub fn detect_snap(
    pointer: Point,
    screen: ScreenSize,
    sensitivity: i32,
    zones_enabled: bool,
) -> SnapResult {
    if is_maximize_gesture(pointer, screen, sensitivity) {
        return SnapResult::NoSnap;
    }
    match detect_edge_snap(pointer, screen, sensitivity) {
        SnapResult::NoSnap if zones_enabled => detect_zone(pointer, screen)
            .map(|zone| SnapResult::ZoneSnap(zone.position))
            .unwrap_or(SnapResult::NoSnap),
        result => result,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    Left,
    Right,
    Up,
    Down,
}

/// What a directional snap shortcut should do to a window in `state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardSnap {
    Snap(SnapPosition),
    Maximize,
    Restore,
    Minimize,
    Unchanged,
}

pub fn keyboard_snap(state: WindowState, direction: SnapDirection) -> KeyboardSnap {
    use SnapDirection::*;
    match state {
        WindowState::Minimized => KeyboardSnap::Unchanged,
        WindowState::Snapped(position) => {
            let left = position.is_left();
            match (direction, position.band()) {
                (Left, _) if left => KeyboardSnap::Unchanged,
                (Right, _) if !left => KeyboardSnap::Unchanged,
                (Left | Right, Band::Full) => KeyboardSnap::Restore,
                (Left, band) => KeyboardSnap::Snap(SnapPosition::from_parts(true, band)),
                (Right, band) => KeyboardSnap::Snap(SnapPosition::from_parts(false, band)),
                (Up, Band::Full) => KeyboardSnap::Snap(SnapPosition::from_parts(left, Band::Top)),
                (Down, Band::Full) => {
                    KeyboardSnap::Snap(SnapPosition::from_parts(left, Band::Bottom))
                }
                (Up, Band::Top) => KeyboardSnap::Maximize,
                (Down, Band::Bottom) => KeyboardSnap::Minimize,
                (Up | Down, _) => KeyboardSnap::Snap(SnapPosition::from_parts(left, Band::Full)),
            }
        }
        WindowState::Maximized => match direction {
            Left => KeyboardSnap::Snap(SnapPosition::LeftHalf),
            Right => KeyboardSnap::Snap(SnapPosition::RightHalf),
            Up => KeyboardSnap::Unchanged,
            Down => KeyboardSnap::Restore,
        },
        WindowState::Normal | WindowState::Floating => match direction {
            Left => KeyboardSnap::Snap(SnapPosition::LeftHalf),
            Right => KeyboardSnap::Snap(SnapPosition::RightHalf),
            Up => KeyboardSnap::Maximize,
            Down => KeyboardSnap::Minimize,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: ScreenSize = ScreenSize::new(1920, 1080);

    fn overlaps(a: Rect, b: Rect) -> bool {
        a.intersection(b).area() > 0
    }

    #[test]
    fn halves_tile_the_screen() {
        for screen in [HD, ScreenSize::new(1001, 777), ScreenSize::new(1, 1)] {
            let area = screen.area().unwrap();
            let left = bounds_for(SnapPosition::LeftHalf, screen).unwrap();
            let right = bounds_for(SnapPosition::RightHalf, screen).unwrap();
            assert!(!overlaps(left, right));
            assert_eq!(left.area() + right.area(), area.area());
            assert_eq!(left.union(right), area);
        }
    }

    #[test]
    fn quadrants_tile_the_screen() {
        for screen in [HD, ScreenSize::new(1001, 777), ScreenSize::new(3, 5)] {
            let area = screen.area().unwrap();
            let quads: Vec<Rect> = [
                SnapPosition::TopLeft,
                SnapPosition::TopRight,
                SnapPosition::BottomLeft,
                SnapPosition::BottomRight,
            ]
            .into_iter()
            .map(|p| bounds_for(p, screen).unwrap())
            .collect();
            let total: u32 = quads.iter().map(|r| r.area()).sum();
            assert_eq!(total, area.area());
            for (i, a) in quads.iter().enumerate() {
                for b in quads.iter().skip(i + 1) {
                    assert!(!overlaps(*a, *b), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn quadrant_bounds_on_hd_screen() {
        assert_eq!(
            bounds_for(SnapPosition::BottomRight, HD),
            Some(Rect::new(960, 540, 960, 540))
        );
        assert_eq!(
            bounds_for(SnapPosition::TopLeft, HD),
            Some(Rect::new(0, 0, 960, 540))
        );
    }

    #[test]
    fn degenerate_screen_never_snaps() {
        for screen in [
            ScreenSize::new(0, 1080),
            ScreenSize::new(1920, 0),
            ScreenSize::new(-5, -5),
        ] {
            assert_eq!(bounds_for(SnapPosition::LeftHalf, screen), None);
            assert_eq!(
                detect_edge_snap(Point::new(5, 100), screen, 50),
                SnapResult::NoSnap
            );
            assert!(detect_zone(Point::new(0, 0), screen).is_none());
            assert!(!is_maximize_gesture(Point::new(5, 5), screen, 50));
        }
    }

    #[test]
    fn edge_snap_picks_quadrant_by_vertical_half() {
        assert_eq!(
            detect_edge_snap(Point::new(5, 100), HD, 50),
            SnapResult::EdgeSnap(SnapPosition::TopLeft)
        );
        assert_eq!(
            detect_edge_snap(Point::new(5, 900), HD, 50),
            SnapResult::EdgeSnap(SnapPosition::BottomLeft)
        );
        assert_eq!(
            detect_edge_snap(Point::new(1900, 100), HD, 50),
            SnapResult::EdgeSnap(SnapPosition::TopRight)
        );
        assert_eq!(
            detect_edge_snap(Point::new(1919, 1079), HD, 50),
            SnapResult::EdgeSnap(SnapPosition::BottomRight)
        );
        assert_eq!(
            detect_edge_snap(Point::new(960, 540), HD, 50),
            SnapResult::NoSnap
        );
    }

    #[test]
    fn top_edge_is_reserved_for_maximize() {
        assert_eq!(detect_edge_snap(Point::new(5, 5), HD, 50), SnapResult::NoSnap);
        assert_eq!(
            detect_edge_snap(Point::new(960, 10), HD, 50),
            SnapResult::NoSnap
        );
        assert!(is_maximize_gesture(Point::new(5, 5), HD, 50));
        assert_eq!(detect_snap(Point::new(5, 5), HD, 50, true), SnapResult::NoSnap);
    }

    #[test]
    fn zero_sensitivity_disables_edges() {
        assert_eq!(detect_edge_snap(Point::new(0, 500), HD, 0), SnapResult::NoSnap);
        assert!(!is_maximize_gesture(Point::new(500, 0), HD, 0));
    }

    #[test]
    fn every_point_maps_to_exactly_one_zone() {
        let steps = 40;
        for i in 0..=steps {
            for j in 0..=steps {
                let x = i as f32 / steps as f32;
                let y = j as f32 / steps as f32;
                let hits = SNAP_ZONES
                    .iter()
                    .filter(|zone| zone.rect.contains(x, y))
                    .count();
                assert_eq!(hits, 1, "point ({x}, {y}) hit {hits} zones");
            }
        }
    }

    #[test]
    fn zone_detection_normalizes_pointer() {
        let zone = detect_zone(Point::new(100, 540), HD).unwrap();
        assert_eq!(zone.position, SnapPosition::LeftHalf);
        let zone = detect_zone(Point::new(1800, 1000), HD).unwrap();
        assert_eq!(zone.position, SnapPosition::BottomRight);
        let zone = detect_zone(Point::new(1920, 1080), HD).unwrap();
        assert_eq!(zone.position, SnapPosition::BottomRight);
        assert!(detect_zone(Point::new(-1, 10), HD).is_none());
        assert!(detect_zone(Point::new(10, 2000), HD).is_none());
    }

    #[test]
    fn detect_snap_prefers_edges_then_zones() {
        assert_eq!(
            detect_snap(Point::new(10, 300), HD, 50, true),
            SnapResult::EdgeSnap(SnapPosition::TopLeft)
        );
        assert_eq!(
            detect_snap(Point::new(1500, 500), HD, 50, true),
            SnapResult::ZoneSnap(SnapPosition::RightHalf)
        );
        assert_eq!(
            detect_snap(Point::new(1500, 500), HD, 50, false),
            SnapResult::NoSnap
        );
    }

    #[test]
    fn keyboard_snap_transitions() {
        use SnapDirection::*;
        let normal = WindowState::Normal;
        assert_eq!(
            keyboard_snap(normal, Left),
            KeyboardSnap::Snap(SnapPosition::LeftHalf)
        );
        assert_eq!(keyboard_snap(normal, Up), KeyboardSnap::Maximize);
        assert_eq!(keyboard_snap(normal, Down), KeyboardSnap::Minimize);

        let left = WindowState::Snapped(SnapPosition::LeftHalf);
        assert_eq!(
            keyboard_snap(left, Up),
            KeyboardSnap::Snap(SnapPosition::TopLeft)
        );
        assert_eq!(
            keyboard_snap(left, Down),
            KeyboardSnap::Snap(SnapPosition::BottomLeft)
        );
        assert_eq!(keyboard_snap(left, Right), KeyboardSnap::Restore);
        assert_eq!(keyboard_snap(left, Left), KeyboardSnap::Unchanged);

        let top_right = WindowState::Snapped(SnapPosition::TopRight);
        assert_eq!(
            keyboard_snap(top_right, Down),
            KeyboardSnap::Snap(SnapPosition::RightHalf)
        );
        assert_eq!(
            keyboard_snap(top_right, Left),
            KeyboardSnap::Snap(SnapPosition::TopLeft)
        );
        assert_eq!(keyboard_snap(top_right, Up), KeyboardSnap::Maximize);
        assert_eq!(keyboard_snap(top_right, Right), KeyboardSnap::Unchanged);

        let top_left = WindowState::Snapped(SnapPosition::TopLeft);
        assert_eq!(keyboard_snap(top_left, Left), KeyboardSnap::Unchanged);
        assert_eq!(
            keyboard_snap(top_left, Right),
            KeyboardSnap::Snap(SnapPosition::TopRight)
        );
        assert_eq!(
            keyboard_snap(WindowState::Snapped(SnapPosition::BottomRight), Right),
            KeyboardSnap::Unchanged
        );

        assert_eq!(
            keyboard_snap(WindowState::Maximized, Down),
            KeyboardSnap::Restore
        );
        assert_eq!(
            keyboard_snap(WindowState::Minimized, Up),
            KeyboardSnap::Unchanged
        );
    }
}
