//! Pointer-driven window dragging.
//!
//! A drag is a sequence of independent samples: `begin` on press, `update`
//! per motion event, `end` on release. Each call completes its registry
//! mutation before returning; the controller only remembers where the window
//! was grabbed.

use ratatui::prelude::Rect;

use crate::constants::DEFAULT_EDGE_SNAP_SENSITIVITY;
use crate::layout::snap::{
    ScreenSize, SnapPosition, SnapResult, bounds_for, detect_snap, is_maximize_gesture,
};
use crate::window::{Point, WindowId, WindowRegistry, WindowState};

#[derive(Debug, Clone, Copy)]
struct DragSession {
    id: WindowId,
    // pointer offset from the window origin
    grab: Point,
    start: Point,
    moved: bool,
}

/// What releasing the pointer right now would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPreview {
    Snap { result: SnapResult, bounds: Rect },
    Maximize { bounds: Rect },
}

impl DragPreview {
    pub fn bounds(&self) -> Rect {
        match self {
            DragPreview::Snap { bounds, .. } | DragPreview::Maximize { bounds } => *bounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Maximized(WindowId),
    Snapped(WindowId, SnapPosition),
    Moved(WindowId),
    /// No drag in progress, the window vanished, or the pointer never moved.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct DragController {
    sensitivity: i32,
    zone_snapping: bool,
    session: Option<DragSession>,
    preview: Option<DragPreview>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_SNAP_SENSITIVITY, false)
    }
}

impl DragController {
    pub fn new(sensitivity: i32, zone_snapping: bool) -> Self {
        Self {
            sensitivity,
            zone_snapping,
            session: None,
            preview: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_window(&self) -> Option<WindowId> {
        self.session.map(|s| s.id)
    }

    pub fn preview(&self) -> Option<DragPreview> {
        self.preview
    }

    /// Grab `id` at `pointer`. Focuses the window. Returns false when the
    /// window is unknown, immovable or not on screen.
    pub fn begin(&mut self, registry: &mut WindowRegistry, id: WindowId, pointer: Point) -> bool {
        let Some(window) = registry.get(id) else {
            return false;
        };
        if !window.capabilities().movable || !window.is_focusable() {
            return false;
        }
        let grab = pointer.offset_from(window.geometry().origin());
        registry.focus_window(id);
        self.session = Some(DragSession {
            id,
            grab,
            start: pointer,
            moved: false,
        });
        self.preview = None;
        tracing::trace!(window_id = %id, x = pointer.x, y = pointer.y, "drag started");
        true
    }

    /// Follow the pointer and report the snap that a release here would apply.
    pub fn update(&mut self, registry: &mut WindowRegistry, pointer: Point) -> SnapResult {
        let Some(mut session) = self.session else {
            return SnapResult::NoSnap;
        };
        let Some(window) = registry.get(session.id) else {
            self.cancel();
            return SnapResult::NoSnap;
        };
        if !session.moved && pointer == session.start {
            return SnapResult::NoSnap;
        }
        // pulling a snapped or maximized window out returns it to its old size
        if matches!(
            window.state(),
            WindowState::Maximized | WindowState::Snapped(_)
        ) && registry.restore(session.id)
            && let Some(window) = registry.get(session.id)
        {
            let max_x = (window.geometry().width as i32 - 1).max(0);
            session.grab.x = session.grab.x.clamp(0, max_x);
        }
        session.moved = true;
        let origin = pointer.offset_from(session.grab);
        registry.move_window(session.id, origin);
        self.session = Some(session);

        let screen = registry.screen();
        let result = detect_snap(pointer, screen, self.sensitivity, self.zone_snapping);
        self.preview = self.preview_for(pointer, screen, result);
        tracing::trace!(window_id = %session.id, x = pointer.x, y = pointer.y, ?result, "drag sample");
        result
    }

    fn preview_for(&self, pointer: Point, screen: ScreenSize, result: SnapResult) -> Option<DragPreview> {
        if is_maximize_gesture(pointer, screen, self.sensitivity) {
            return screen.area().map(|bounds| DragPreview::Maximize { bounds });
        }
        let position = result.position()?;
        bounds_for(position, screen).map(|bounds| DragPreview::Snap { result, bounds })
    }

    /// Release the pointer: maximize, snap or leave the window where it is.
    pub fn end(&mut self, registry: &mut WindowRegistry, pointer: Point) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::Cancelled;
        };
        self.preview = None;
        if !registry.contains(session.id) || !session.moved {
            return DragOutcome::Cancelled;
        }
        let id = session.id;
        let screen = registry.screen();
        let outcome = if is_maximize_gesture(pointer, screen, self.sensitivity) && registry.maximize(id)
        {
            DragOutcome::Maximized(id)
        } else {
            match detect_snap(pointer, screen, self.sensitivity, self.zone_snapping).position() {
                Some(position) if registry.snap(id, position) => DragOutcome::Snapped(id, position),
                _ => DragOutcome::Moved(id),
            }
        };
        tracing::debug!(window_id = %id, ?outcome, "drag finished");
        outcome
    }

    pub fn cancel(&mut self) {
        self.session = None;
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Capabilities, FloatRect, WindowConfig};

    fn setup() -> (WindowRegistry, WindowId) {
        let mut reg = WindowRegistry::with_screen(ScreenSize::new(1920, 1080));
        let id = reg.create_window(
            WindowConfig::new("drag me").with_geometry(FloatRect::new(400, 300, 600, 400)),
        );
        (reg, id)
    }

    #[test]
    fn drag_moves_window_with_grab_offset() {
        let (mut reg, id) = setup();
        let mut drag = DragController::default();
        assert!(drag.begin(&mut reg, id, Point::new(450, 310)));
        assert_eq!(drag.update(&mut reg, Point::new(850, 610)), SnapResult::NoSnap);
        assert_eq!(reg.get(id).unwrap().geometry().origin(), Point::new(800, 600));
        assert_eq!(drag.end(&mut reg, Point::new(850, 610)), DragOutcome::Moved(id));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn release_at_left_edge_snaps_quadrant() {
        let (mut reg, id) = setup();
        let mut drag = DragController::default();
        drag.begin(&mut reg, id, Point::new(450, 310));
        let result = drag.update(&mut reg, Point::new(5, 900));
        assert_eq!(result, SnapResult::EdgeSnap(SnapPosition::BottomLeft));
        assert_eq!(
            drag.preview().map(|p| p.bounds()),
            Some(Rect::new(0, 540, 960, 540))
        );
        assert_eq!(
            drag.end(&mut reg, Point::new(5, 900)),
            DragOutcome::Snapped(id, SnapPosition::BottomLeft)
        );
        assert_eq!(
            reg.get(id).unwrap().state(),
            WindowState::Snapped(SnapPosition::BottomLeft)
        );
    }

    #[test]
    fn release_at_top_edge_maximizes() {
        let (mut reg, id) = setup();
        let mut drag = DragController::default();
        drag.begin(&mut reg, id, Point::new(450, 310));
        drag.update(&mut reg, Point::new(5, 5));
        assert!(matches!(drag.preview(), Some(DragPreview::Maximize { .. })));
        assert_eq!(drag.end(&mut reg, Point::new(5, 5)), DragOutcome::Maximized(id));
        assert_eq!(reg.get(id).unwrap().state(), WindowState::Maximized);
    }

    #[test]
    fn zone_snapping_is_opt_in() {
        let (mut reg, id) = setup();
        let mut drag = DragController::new(50, true);
        drag.begin(&mut reg, id, Point::new(450, 310));
        let result = drag.update(&mut reg, Point::new(1500, 500));
        assert_eq!(result, SnapResult::ZoneSnap(SnapPosition::RightHalf));
        assert_eq!(
            drag.end(&mut reg, Point::new(1500, 500)),
            DragOutcome::Snapped(id, SnapPosition::RightHalf)
        );
    }

    #[test]
    fn dragging_a_snapped_window_restores_it() {
        let (mut reg, id) = setup();
        reg.snap(id, SnapPosition::LeftHalf);
        let mut drag = DragController::default();
        drag.begin(&mut reg, id, Point::new(900, 10));
        drag.update(&mut reg, Point::new(905, 200));
        let window = reg.get(id).unwrap();
        assert_eq!(window.state(), WindowState::Normal);
        assert_eq!(window.geometry().width, 600);
        // grab offset clamped into the restored width
        assert_eq!(window.geometry().origin(), Point::new(306, 190));
    }

    #[test]
    fn click_without_motion_is_cancelled() {
        let (mut reg, id) = setup();
        reg.snap(id, SnapPosition::LeftHalf);
        let mut drag = DragController::default();
        drag.begin(&mut reg, id, Point::new(100, 100));
        drag.update(&mut reg, Point::new(100, 100));
        assert_eq!(drag.end(&mut reg, Point::new(100, 100)), DragOutcome::Cancelled);
        assert_eq!(
            reg.get(id).unwrap().snap_position(),
            Some(SnapPosition::LeftHalf)
        );
    }

    #[test]
    fn immovable_windows_cannot_be_grabbed() {
        let mut reg = WindowRegistry::with_screen(ScreenSize::new(800, 600));
        let id = reg.create_window(WindowConfig::new("pinned").with_capabilities(Capabilities {
            movable: false,
            ..Capabilities::default()
        }));
        let mut drag = DragController::default();
        assert!(!drag.begin(&mut reg, id, Point::new(1, 1)));
        assert_eq!(drag.end(&mut reg, Point::new(5, 5)), DragOutcome::Cancelled);
    }

    #[test]
    fn window_closed_mid_drag_cancels() {
        let (mut reg, id) = setup();
        let mut drag = DragController::default();
        drag.begin(&mut reg, id, Point::new(450, 310));
        reg.close_window(id);
        assert_eq!(drag.update(&mut reg, Point::new(500, 500)), SnapResult::NoSnap);
        assert!(!drag.is_dragging());
    }
}
