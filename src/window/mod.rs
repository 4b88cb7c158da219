pub mod decorator;

mod events;
mod focus_ring;
mod registry;

use std::fmt;

use ratatui::layout::{Rect, Size};

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::layout::snap::SnapPosition;

pub use events::{CommandOutcome, ListenerHandle, WindowCommand, WindowEvent};
pub use focus_ring::FocusRing;
pub use registry::WindowRegistry;

/// Opaque window identifier. Assigned by the registry, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Signed position in logical units. Windows and pointers may sit partially
/// off screen, so both axes are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x.saturating_sub(origin.x),
            y: self.y.saturating_sub(origin.y),
        }
    }
}

/// Signed floating rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }

    pub fn with_size(self, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..self
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Portion of the rectangle that lies inside `bounds`, or an empty rect.
    pub fn visible_in(&self, bounds: Rect) -> Rect {
        let bounds_x0 = bounds.x as i32;
        let bounds_y0 = bounds.y as i32;
        let bounds_x1 = bounds_x0 + bounds.width as i32;
        let bounds_y1 = bounds_y0 + bounds.height as i32;
        let x0 = self.x.max(bounds_x0);
        let y0 = self.y.max(bounds_y0);
        let x1 = self.right().min(bounds_x1);
        let y1 = self.bottom().min(bounds_y1);
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        }
    }
}

impl From<Rect> for FloatRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Presentation state of a window.
///
/// The snap position lives inside `Snapped`, so a window carries one exactly
/// when it is snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
    Snapped(SnapPosition),
    Floating,
}

impl WindowState {
    pub fn snap_position(self) -> Option<SnapPosition> {
        match self {
            WindowState::Snapped(position) => Some(position),
            _ => None,
        }
    }

    pub fn is_minimized(self) -> bool {
        self == WindowState::Minimized
    }

    pub fn label(self) -> &'static str {
        match self {
            WindowState::Normal => "normal",
            WindowState::Minimized => "minimized",
            WindowState::Maximized => "maximized",
            WindowState::Snapped(position) => position.label(),
            WindowState::Floating => "floating",
        }
    }
}

/// Capability flags fixed at creation time. They gate which operations have
/// an effect; an operation whose flag is off is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub movable: bool,
    pub resizable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
    pub closable: bool,
    pub show_in_taskbar: bool,
    pub visible: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            movable: true,
            resizable: true,
            minimizable: true,
            maximizable: true,
            closable: true,
            show_in_taskbar: true,
            visible: true,
        }
    }
}

impl Capabilities {
    /// Fixed-size surface such as a dialog: movable and closable only.
    pub fn fixed() -> Self {
        Self {
            resizable: false,
            minimizable: false,
            maximizable: false,
            ..Self::default()
        }
    }
}

/// Creation parameters handed over by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub geometry: FloatRect,
    pub capabilities: Capabilities,
    pub always_on_top: bool,
    pub group_key: Option<String>,
    pub icon: Option<String>,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            geometry: FloatRect::new(0, 0, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            capabilities: Capabilities::default(),
            always_on_top: false,
            group_key: None,
            icon: None,
        }
    }

    pub fn with_geometry(mut self, geometry: FloatRect) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_group(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn always_on_top(mut self, enabled: bool) -> Self {
        self.always_on_top = enabled;
        self
    }
}

/// Logical timestamp of a focus grant, taken from the registry's focus clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FocusStamp(u64);

impl FocusStamp {
    pub const NEVER: FocusStamp = FocusStamp(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

/// One virtual application surface tracked by the registry.
#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    title: String,
    geometry: FloatRect,
    state: WindowState,
    z_index: u64,
    has_focus: bool,
    last_focus: FocusStamp,
    capabilities: Capabilities,
    always_on_top: bool,
    group_key: String,
    icon: Option<String>,
    // geometry to put back when leaving Maximized/Snapped
    restore_geometry: Option<FloatRect>,
}

impl Window {
    fn new(id: WindowId, z_index: u64, config: WindowConfig) -> Self {
        let group_key = config.group_key.unwrap_or_else(|| id.to_string());
        Self {
            id,
            title: config.title,
            geometry: config.geometry,
            state: WindowState::Normal,
            z_index,
            has_focus: false,
            last_focus: FocusStamp::NEVER,
            capabilities: config.capabilities,
            always_on_top: config.always_on_top,
            group_key,
            icon: config.icon,
            restore_geometry: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> FloatRect {
        self.geometry
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn snap_position(&self) -> Option<SnapPosition> {
        self.state.snap_position()
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn last_focus(&self) -> FocusStamp {
        self.last_focus
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn is_always_on_top(&self) -> bool {
        self.always_on_top
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn is_minimized(&self) -> bool {
        self.state.is_minimized()
    }

    /// Visible and not minimized: the only windows that may hold focus.
    pub fn is_focusable(&self) -> bool {
        self.capabilities.visible && !self.is_minimized()
    }
}
