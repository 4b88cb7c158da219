//! Key chord → window operation dispatch.
//!
//! The dispatcher owns nothing but its bindings; every effect goes through
//! the public operations of the registry, the snap engine and the taskbar.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::keybindings::{Action, KeyBindings};
use crate::layout::snap::{KeyboardSnap, SnapDirection, keyboard_snap};
use crate::taskbar::{self, BadgeSource};
use crate::window::WindowRegistry;

#[derive(Debug, Clone, Default)]
pub struct ShortcutDispatcher {
    bindings: KeyBindings,
}

impl ShortcutDispatcher {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Resolve `key` and apply the bound action. Returns the action when the
    /// key is bound, whether or not it changed anything.
    pub fn dispatch(
        &self,
        key: &KeyEvent,
        registry: &mut WindowRegistry,
        badges: &dyn BadgeSource,
    ) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let action = self.bindings.action_for_key(key)?;
        let applied = perform(action, registry, badges);
        tracing::debug!(%action, applied, "shortcut");
        Some(action)
    }
}

/// Apply `action` to the focused window (or the taskbar). `Quit` is left to
/// the caller and always reports `false`.
pub fn perform(action: Action, registry: &mut WindowRegistry, badges: &dyn BadgeSource) -> bool {
    match action {
        Action::Quit => false,
        Action::SnapLeft => snap_focused(registry, SnapDirection::Left),
        Action::SnapRight => snap_focused(registry, SnapDirection::Right),
        Action::SnapUp => snap_focused(registry, SnapDirection::Up),
        Action::SnapDown => snap_focused(registry, SnapDirection::Down),
        Action::Minimize => with_focused(registry, WindowRegistry::minimize),
        Action::Maximize => with_focused(registry, WindowRegistry::maximize),
        Action::Restore => with_focused(registry, WindowRegistry::restore),
        Action::Close => with_focused(registry, WindowRegistry::close_window),
        Action::ToggleAlwaysOnTop => with_focused(registry, WindowRegistry::toggle_always_on_top),
        Action::CycleNextWindow => registry.cycle_focus(true).is_some(),
        Action::CyclePrevWindow => registry.cycle_focus(false).is_some(),
        Action::ActivateTaskbarItem(slot) => {
            let items = taskbar::project(registry, badges);
            let Some(item) = (slot as usize)
                .checked_sub(1)
                .and_then(|idx| items.get(idx))
            else {
                return false;
            };
            taskbar::on_item_click(registry, item).is_some()
        }
    }
}

fn with_focused(
    registry: &mut WindowRegistry,
    op: fn(&mut WindowRegistry, crate::window::WindowId) -> bool,
) -> bool {
    match registry.focused_id() {
        Some(id) => op(registry, id),
        None => false,
    }
}

fn snap_focused(registry: &mut WindowRegistry, direction: SnapDirection) -> bool {
    let Some(window) = registry.focused() else {
        return false;
    };
    let id = window.id();
    match keyboard_snap(window.state(), direction) {
        KeyboardSnap::Snap(position) => registry.snap(id, position),
        KeyboardSnap::Maximize => registry.maximize(id),
        KeyboardSnap::Restore => registry.restore(id),
        KeyboardSnap::Minimize => registry.minimize(id),
        KeyboardSnap::Unchanged => false,
    }
}
