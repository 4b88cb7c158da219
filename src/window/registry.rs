use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use ratatui::layout::Size;

use super::events::Listener;
use super::{
    CommandOutcome, FloatRect, FocusRing, FocusStamp, ListenerHandle, Point, Window, WindowCommand,
    WindowConfig, WindowEvent, WindowId, WindowState,
};
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::layout::snap::{ScreenSize, SnapPosition, bounds_for};

/// Authoritative set of open windows.
///
/// The registry is the only owner of window records, the z-order counter and
/// the focus clock. Every mutation is synchronous; listeners run after the
/// mutation has been applied, over a copy of the listener list.
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, Window>,
    next_id: u64,
    next_z: u64,
    focus_clock: u64,
    screen: ScreenSize,
    listeners: Vec<(ListenerHandle, Listener)>,
    next_listener: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("windows", &self.windows)
            .field("next_z", &self.next_z)
            .field("focus_clock", &self.focus_clock)
            .field("screen", &self.screen)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
            next_z: 0,
            focus_clock: 0,
            screen: ScreenSize::default(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn with_screen(screen: ScreenSize) -> Self {
        let mut registry = Self::new();
        registry.screen = screen;
        registry
    }

    // ----- listeners -------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl Fn(&WindowEvent) + 'static) -> ListenerHandle {
        let handle = ListenerHandle(self.next_listener);
        self.next_listener = self.next_listener.saturating_add(1);
        self.listeners.push((handle, Rc::new(listener)));
        handle
    }

    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    fn emit(&self, event: WindowEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(&event);
        }
    }

    // ----- screen ----------------------------------------------------------

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Record the latest screen size and re-fit maximized and snapped windows.
    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        if self.screen == screen {
            return;
        }
        tracing::debug!(width = screen.width, height = screen.height, "screen size changed");
        self.screen = screen;
        let mut events = Vec::new();
        for window in self.windows.values_mut() {
            match window.state {
                WindowState::Maximized => {
                    if let Some(area) = screen.area() {
                        window.geometry = FloatRect::from(area);
                        events.push(WindowEvent::Maximized {
                            id: window.id,
                            geometry: window.geometry,
                        });
                    }
                }
                WindowState::Snapped(position) => {
                    if let Some(bounds) = bounds_for(position, screen) {
                        window.geometry = FloatRect::from(bounds);
                        events.push(WindowEvent::Snapped {
                            id: window.id,
                            position,
                            geometry: window.geometry,
                        });
                    }
                }
                _ => {}
            }
        }
        for event in events {
            self.emit(event);
        }
    }

    // ----- queries ---------------------------------------------------------

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// All windows in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    /// Top-to-bottom order: z-index descending.
    pub fn windows_by_z(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.windows.values().collect();
        windows.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        windows
    }

    /// Bottom-to-top paint order of everything that should be drawn.
    /// Always-on-top windows form a layer above the rest.
    pub fn paint_order(&self) -> Vec<&Window> {
        let mut windows = self.visible_windows();
        windows.reverse();
        windows.sort_by_key(|w| w.always_on_top);
        windows
    }

    /// Visible, non-minimized windows, z-index descending.
    pub fn visible_windows(&self) -> Vec<&Window> {
        self.windows_by_z()
            .into_iter()
            .filter(|w| w.is_focusable())
            .collect()
    }

    /// Windows flagged for the taskbar, in creation order.
    pub fn taskbar_windows(&self) -> impl Iterator<Item = &Window> {
        self.windows
            .values()
            .filter(|w| w.capabilities.show_in_taskbar)
    }

    pub fn focused(&self) -> Option<&Window> {
        self.windows.values().find(|w| w.has_focus)
    }

    pub fn focused_id(&self) -> Option<WindowId> {
        self.focused().map(|w| w.id)
    }

    // ----- counters --------------------------------------------------------

    fn bump_z(&mut self) -> u64 {
        self.next_z = self.next_z.saturating_add(1);
        self.next_z
    }

    fn tick_focus(&mut self) -> FocusStamp {
        self.focus_clock = self.focus_clock.saturating_add(1);
        FocusStamp(self.focus_clock)
    }

    // ----- lifecycle -------------------------------------------------------

    pub fn create_window(&mut self, config: WindowConfig) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let z_index = self.bump_z();
        let window = Window::new(id, z_index, config);
        tracing::debug!(window_id = %id, title = %window.title, group = %window.group_key, "opened window");
        self.windows.insert(id, window);
        self.emit(WindowEvent::Created { id });
        self.focus_window(id);
        id
    }

    /// Give `id` the single global focus and raise it above every window.
    ///
    /// Focusing the already focused window still raises it. Minimized and
    /// invisible windows cannot take focus.
    pub fn focus_window(&mut self, id: WindowId) -> bool {
        match self.windows.get(&id) {
            Some(window) if window.is_focusable() => {}
            _ => return false,
        }
        let previous = self.focused_id().filter(|prev| *prev != id);
        for window in self.windows.values_mut() {
            window.has_focus = false;
        }
        let z_index = self.bump_z();
        let stamp = self.tick_focus();
        if let Some(window) = self.windows.get_mut(&id) {
            window.has_focus = true;
            window.z_index = z_index;
            window.last_focus = stamp;
        }
        tracing::debug!(window_id = %id, z_index, "focused window");
        self.emit(WindowEvent::Focused { id, previous });
        self.emit(WindowEvent::BroughtToFront { id, z_index });
        true
    }

    /// Most recently focused window that may still hold focus.
    fn successor_candidate(&self) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|w| w.is_focusable())
            .max_by(|a, b| {
                a.last_focus
                    .cmp(&b.last_focus)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .map(|w| w.id)
    }

    fn focus_successor(&mut self) -> Option<WindowId> {
        let successor = self.successor_candidate();
        match successor {
            Some(id) => {
                self.focus_window(id);
            }
            None => tracing::debug!("no focus successor; focus cleared"),
        }
        successor
    }

    pub fn move_window(&mut self, id: WindowId, position: Point) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if !window.capabilities.movable {
            return false;
        }
        window.geometry = window.geometry.with_origin(position);
        tracing::trace!(window_id = %id, x = position.x, y = position.y, "moved window");
        self.emit(WindowEvent::Moved { id, position });
        true
    }

    pub fn resize_window(&mut self, id: WindowId, size: Size) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if !window.capabilities.resizable {
            return false;
        }
        let size = Size::new(
            size.width.max(MIN_WINDOW_WIDTH),
            size.height.max(MIN_WINDOW_HEIGHT),
        );
        window.geometry = window.geometry.with_size(size);
        tracing::trace!(window_id = %id, width = size.width, height = size.height, "resized window");
        self.emit(WindowEvent::Resized { id, size });
        true
    }

    pub fn minimize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if !window.capabilities.minimizable || window.is_minimized() {
            return false;
        }
        let had_focus = window.has_focus;
        window.state = WindowState::Minimized;
        window.has_focus = false;
        tracing::debug!(window_id = %id, "minimized window");
        self.emit(WindowEvent::Minimized { id });
        if had_focus {
            self.focus_successor();
        }
        true
    }

    pub fn maximize(&mut self, id: WindowId) -> bool {
        let area = self.screen.area();
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if !window.capabilities.maximizable || window.state == WindowState::Maximized {
            return false;
        }
        let current = window.geometry;
        window.restore_geometry.get_or_insert(current);
        if let Some(area) = area {
            window.geometry = FloatRect::from(area);
        }
        window.state = WindowState::Maximized;
        let geometry = window.geometry;
        tracing::debug!(window_id = %id, "maximized window");
        self.emit(WindowEvent::Maximized { id, geometry });
        true
    }

    /// Return a minimized, maximized or snapped window to Normal and focus it.
    pub fn restore(&mut self, id: WindowId) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        match window.state {
            WindowState::Minimized | WindowState::Maximized | WindowState::Snapped(_) => {}
            WindowState::Normal | WindowState::Floating => return false,
        }
        window.state = WindowState::Normal;
        if let Some(previous) = window.restore_geometry.take() {
            window.geometry = previous;
        }
        let geometry = window.geometry;
        tracing::debug!(window_id = %id, "restored window");
        self.emit(WindowEvent::Restored { id, geometry });
        self.focus_window(id);
        true
    }

    /// Place `id` into the screen region of `position`.
    ///
    /// Requires a movable and resizable window and a non-degenerate screen.
    pub fn snap(&mut self, id: WindowId, position: SnapPosition) -> bool {
        let Some(bounds) = bounds_for(position, self.screen) else {
            return false;
        };
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        let caps = window.capabilities;
        if !caps.movable || !caps.resizable {
            return false;
        }
        let current = window.geometry;
        window.restore_geometry.get_or_insert(current);
        window.geometry = FloatRect::from(bounds);
        window.state = WindowState::Snapped(position);
        let geometry = window.geometry;
        tracing::debug!(window_id = %id, position = position.label(), "snapped window");
        self.emit(WindowEvent::Snapped {
            id,
            position,
            geometry,
        });
        true
    }

    /// Flip always-on-top. Turning it on makes the window Floating, turning it
    /// off makes it Normal; any snapped state is not recovered.
    ///
    /// The saved restore geometry goes with the old state, so the next
    /// maximize or snap records the geometry the window has at that point.
    pub fn toggle_always_on_top(&mut self, id: WindowId) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        window.restore_geometry = None;
        window.always_on_top = !window.always_on_top;
        let enabled = window.always_on_top;
        window.state = if enabled {
            WindowState::Floating
        } else {
            WindowState::Normal
        };
        tracing::debug!(window_id = %id, enabled, "toggled always on top");
        self.emit(WindowEvent::AlwaysOnTopChanged { id, enabled });
        true
    }

    pub fn close_window(&mut self, id: WindowId) -> bool {
        let had_focus = match self.windows.get(&id) {
            Some(window) if window.capabilities.closable => window.has_focus,
            _ => return false,
        };
        tracing::debug!(window_id = %id, "closing window");
        self.windows.remove(&id);
        self.emit(WindowEvent::Closed { id });
        if had_focus {
            self.focus_successor();
        }
        true
    }

    pub fn update_title(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        let title = title.into();
        window.title = title.clone();
        self.emit(WindowEvent::TitleChanged { id, title });
        true
    }

    /// Move focus to the next (or previous) visible window in creation order,
    /// restoring it when minimized.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<WindowId> {
        let order: Vec<WindowId> = self
            .windows
            .values()
            .filter(|w| w.capabilities.visible)
            .map(|w| w.id)
            .collect();
        let mut ring = FocusRing::new(order, self.focused_id());
        let target = ring.advance(forward)?;
        let applied = if self.get(target).is_some_and(Window::is_minimized) {
            self.restore(target)
        } else {
            self.focus_window(target)
        };
        applied.then_some(target)
    }

    pub fn apply(&mut self, command: WindowCommand) -> CommandOutcome {
        match command {
            WindowCommand::Create(config) => CommandOutcome::Created(self.create_window(config)),
            WindowCommand::Focus(id) => self.focus_window(id).into(),
            WindowCommand::Move { id, position } => self.move_window(id, position).into(),
            WindowCommand::Resize { id, size } => self.resize_window(id, size).into(),
            WindowCommand::Minimize(id) => self.minimize(id).into(),
            WindowCommand::Maximize(id) => self.maximize(id).into(),
            WindowCommand::Restore(id) => self.restore(id).into(),
            WindowCommand::Snap { id, position } => self.snap(id, position).into(),
            WindowCommand::Close(id) => self.close_window(id).into(),
            WindowCommand::ToggleAlwaysOnTop(id) => self.toggle_always_on_top(id).into(),
            WindowCommand::UpdateTitle { id, title } => self.update_title(id, title).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Capabilities;
    use std::cell::RefCell;

    fn registry() -> WindowRegistry {
        WindowRegistry::with_screen(ScreenSize::new(1920, 1080))
    }

    fn assert_single_focus(registry: &WindowRegistry) {
        let focused = registry.iter().filter(|w| w.has_focus()).count();
        assert!(focused <= 1, "more than one focused window: {focused}");
    }

    #[test]
    fn new_window_is_focused_and_on_top() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        let b = reg.create_window(WindowConfig::new("b"));
        assert_eq!(reg.focused_id(), Some(b));
        assert!(reg.get(b).unwrap().z_index() > reg.get(a).unwrap().z_index());
        assert_eq!(reg.get(b).unwrap().state(), WindowState::Normal);
        assert_single_focus(&reg);
    }

    #[test]
    fn refocus_bumps_z_index_but_keeps_focus() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        let b = reg.create_window(WindowConfig::new("b"));
        reg.focus_window(a);
        let before = reg.get(a).unwrap().z_index();
        assert!(reg.focus_window(a));
        let window = reg.get(a).unwrap();
        assert!(window.z_index() > before);
        assert!(window.has_focus());
        assert!(!reg.get(b).unwrap().has_focus());
    }

    #[test]
    fn minimize_hands_focus_to_most_recent() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        let b = reg.create_window(WindowConfig::new("b"));
        let c = reg.create_window(WindowConfig::new("c"));
        reg.focus_window(a);
        reg.focus_window(c);
        assert!(reg.minimize(c));
        assert_eq!(reg.focused_id(), Some(a));
        assert!(reg.minimize(a));
        assert_eq!(reg.focused_id(), Some(b));
        assert!(reg.minimize(b));
        assert_eq!(reg.focused_id(), None);
        assert_single_focus(&reg);
    }

    #[test]
    fn minimized_window_cannot_take_focus() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        reg.minimize(a);
        assert!(!reg.focus_window(a));
        assert_eq!(reg.focused_id(), None);
    }

    #[test]
    fn invisible_window_is_created_without_focus() {
        let mut reg = registry();
        let shown = reg.create_window(WindowConfig::new("shown"));
        let hidden = reg.create_window(WindowConfig::new("hidden").with_capabilities(
            Capabilities {
                visible: false,
                ..Capabilities::default()
            },
        ));
        assert_eq!(reg.focused_id(), Some(shown));
        assert!(reg.get(hidden).is_some());
        assert!(reg.visible_windows().iter().all(|w| w.id() != hidden));
    }

    #[test]
    fn maximize_then_restore_puts_geometry_back() {
        let mut reg = registry();
        let geometry = FloatRect::new(10, 20, 300, 200);
        let a = reg.create_window(WindowConfig::new("a").with_geometry(geometry));
        let other = reg.create_window(WindowConfig::new("other"));
        assert!(reg.maximize(a));
        assert_eq!(reg.get(a).unwrap().geometry(), FloatRect::new(0, 0, 1920, 1080));
        // maximize leaves focus alone
        assert_eq!(reg.focused_id(), Some(other));
        assert!(reg.restore(a));
        assert_eq!(reg.get(a).unwrap().geometry(), geometry);
        assert_eq!(reg.get(a).unwrap().state(), WindowState::Normal);
        assert_eq!(reg.focused_id(), Some(a));
    }

    #[test]
    fn maximize_respects_capability() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a").with_capabilities(Capabilities::fixed()));
        assert!(!reg.maximize(a));
        assert_eq!(reg.get(a).unwrap().state(), WindowState::Normal);
    }

    #[test]
    fn restore_from_normal_is_a_noop() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        assert!(!reg.restore(a));
    }

    #[test]
    fn snap_ignores_maximizable_flag() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a").with_capabilities(Capabilities {
            maximizable: false,
            ..Capabilities::default()
        }));
        assert!(reg.snap(a, SnapPosition::RightHalf));
        let window = reg.get(a).unwrap();
        assert_eq!(window.snap_position(), Some(SnapPosition::RightHalf));
        assert_eq!(window.geometry(), FloatRect::new(960, 0, 960, 1080));
    }

    #[test]
    fn snap_requires_movable_and_resizable() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a").with_capabilities(Capabilities::fixed()));
        assert!(!reg.snap(a, SnapPosition::LeftHalf));
        assert_eq!(reg.get(a).unwrap().state(), WindowState::Normal);
    }

    #[test]
    fn snap_on_degenerate_screen_is_ignored() {
        let mut reg = WindowRegistry::new();
        let a = reg.create_window(WindowConfig::new("a"));
        assert!(!reg.snap(a, SnapPosition::LeftHalf));
        reg.set_screen_size(ScreenSize::new(-10, 500));
        assert!(!reg.snap(a, SnapPosition::LeftHalf));
    }

    #[test]
    fn always_on_top_toggle_drops_snap_state() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        reg.snap(a, SnapPosition::LeftHalf);
        assert!(reg.toggle_always_on_top(a));
        assert_eq!(reg.get(a).unwrap().state(), WindowState::Floating);
        assert!(reg.get(a).unwrap().is_always_on_top());
        assert!(reg.toggle_always_on_top(a));
        assert_eq!(reg.get(a).unwrap().state(), WindowState::Normal);
        assert!(!reg.get(a).unwrap().is_always_on_top());
    }

    #[test]
    fn restore_after_always_on_top_round_trip_uses_fresh_geometry() {
        let mut reg = registry();
        let a = reg.create_window(
            WindowConfig::new("a").with_geometry(FloatRect::new(10, 10, 300, 200)),
        );
        assert!(reg.snap(a, SnapPosition::LeftHalf));
        reg.toggle_always_on_top(a);
        reg.toggle_always_on_top(a);
        assert!(reg.move_window(a, Point::new(500, 500)));
        let moved = reg.get(a).unwrap().geometry();
        assert_eq!(moved, FloatRect::new(500, 500, 960, 1080));

        assert!(reg.maximize(a));
        assert!(reg.restore(a));
        assert_eq!(reg.get(a).unwrap().geometry(), moved);
    }

    #[test]
    fn snapping_a_floating_window_keeps_it_on_top() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        let b = reg.create_window(WindowConfig::new("b"));
        reg.toggle_always_on_top(a);
        assert!(reg.snap(a, SnapPosition::RightHalf));
        reg.focus_window(b);
        let window = reg.get(a).unwrap();
        assert_eq!(window.state(), WindowState::Snapped(SnapPosition::RightHalf));
        assert!(window.is_always_on_top());
        let order: Vec<_> = reg.paint_order().iter().map(|w| w.id()).collect();
        assert_eq!(order.last(), Some(&a));
    }

    #[test]
    fn close_respects_closable_flag() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a").with_capabilities(Capabilities {
            closable: false,
            ..Capabilities::default()
        }));
        assert!(!reg.close_window(a));
        assert!(reg.contains(a));
    }

    #[test]
    fn closed_ids_are_never_reused() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        reg.close_window(a);
        let b = reg.create_window(WindowConfig::new("b"));
        assert_ne!(a, b);
        assert!(!reg.focus_window(a));
        assert!(!reg.move_window(a, Point::new(1, 1)));
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        reg.resize_window(a, Size::new(1, 1));
        let geometry = reg.get(a).unwrap().geometry();
        assert_eq!(geometry.width, MIN_WINDOW_WIDTH);
        assert_eq!(geometry.height, MIN_WINDOW_HEIGHT);
    }

    #[test]
    fn screen_change_refits_snapped_and_maximized() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        let b = reg.create_window(WindowConfig::new("b"));
        reg.snap(a, SnapPosition::BottomRight);
        reg.maximize(b);
        reg.set_screen_size(ScreenSize::new(1000, 800));
        assert_eq!(reg.get(a).unwrap().geometry(), FloatRect::new(500, 400, 500, 400));
        assert_eq!(reg.get(b).unwrap().geometry(), FloatRect::new(0, 0, 1000, 800));
    }

    #[test]
    fn listeners_receive_events_until_unsubscribed() {
        let mut reg = registry();
        let seen: Rc<RefCell<Vec<WindowEvent>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let handle = reg.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        let a = reg.create_window(WindowConfig::new("a"));
        {
            let events = seen.borrow();
            assert_eq!(events[0], WindowEvent::Created { id: a });
            assert!(matches!(events[1], WindowEvent::Focused { id, previous: None } if id == a));
            assert!(matches!(events[2], WindowEvent::BroughtToFront { id, .. } if id == a));
        }
        assert!(reg.unsubscribe(handle));
        assert!(!reg.unsubscribe(handle));
        reg.minimize(a);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn rejected_operations_emit_nothing() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a").with_capabilities(Capabilities::fixed()));
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        reg.subscribe(move |_| *sink.borrow_mut() += 1);
        reg.resize_window(a, Size::new(50, 50));
        reg.minimize(a);
        reg.maximize(a);
        reg.snap(a, SnapPosition::LeftHalf);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn cycle_focus_walks_creation_order_and_restores() {
        let mut reg = registry();
        let a = reg.create_window(WindowConfig::new("a"));
        let b = reg.create_window(WindowConfig::new("b"));
        let c = reg.create_window(WindowConfig::new("c"));
        reg.minimize(a);
        assert_eq!(reg.focused_id(), Some(c));
        assert_eq!(reg.cycle_focus(true), Some(a));
        assert_eq!(reg.get(a).unwrap().state(), WindowState::Normal);
        assert_eq!(reg.cycle_focus(true), Some(b));
        assert_eq!(reg.cycle_focus(false), Some(a));
    }

    #[test]
    fn apply_routes_commands() {
        let mut reg = registry();
        let outcome = reg.apply(WindowCommand::Create(WindowConfig::new("a")));
        let CommandOutcome::Created(a) = outcome else {
            panic!("expected a created window");
        };
        assert_eq!(
            reg.apply(WindowCommand::UpdateTitle {
                id: a,
                title: "renamed".into()
            }),
            CommandOutcome::Applied
        );
        assert_eq!(reg.get(a).unwrap().title(), "renamed");
        reg.close_window(a);
        assert_eq!(reg.apply(WindowCommand::Minimize(a)), CommandOutcome::Ignored);
    }
}
