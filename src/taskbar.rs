//! Taskbar projection over the window registry.
//!
//! Everything here is a function of the registry's current state. Nothing is
//! cached between calls: items handed out by [`project`] are snapshots, and
//! the interaction functions re-read the live group membership from the
//! registry before acting.

use std::collections::HashMap;

use crate::window::{Window, WindowId, WindowRegistry};

/// Per-window indicators that live outside the window core (notification
/// listeners, badge counters).
pub trait BadgeSource {
    fn has_notification(&self, _window: &Window) -> bool {
        false
    }

    fn is_badged(&self, _window: &Window) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoBadges;

impl BadgeSource for NoBadges {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarWindow {
    pub id: WindowId,
    pub title: String,
    pub minimized: bool,
    pub focused: bool,
    pub closable: bool,
}

impl From<&Window> for TaskbarWindow {
    fn from(window: &Window) -> Self {
        Self {
            id: window.id(),
            title: window.title().to_string(),
            minimized: window.is_minimized(),
            focused: window.has_focus(),
            closable: window.capabilities().closable,
        }
    }
}

/// One taskbar entry: every taskbar window sharing a group key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarItem {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub window_count: usize,
    pub has_notification: bool,
    pub is_active: bool,
    pub is_badged: bool,
    pub windows: Vec<TaskbarWindow>,
}

pub fn project(registry: &WindowRegistry, badges: &dyn BadgeSource) -> Vec<TaskbarItem> {
    let mut items: Vec<TaskbarItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for window in registry.taskbar_windows() {
        let slot = *index.entry(window.group_key()).or_insert_with(|| {
            items.push(TaskbarItem {
                id: window.group_key().to_string(),
                title: window.title().to_string(),
                icon: window.icon().map(str::to_string),
                window_count: 0,
                has_notification: false,
                is_active: false,
                is_badged: false,
                windows: Vec::new(),
            });
            items.len() - 1
        });
        let item = &mut items[slot];
        item.window_count += 1;
        item.is_active |= window.has_focus();
        item.has_notification |= badges.has_notification(window);
        item.is_badged |= badges.is_badged(window);
        item.windows.push(TaskbarWindow::from(window));
    }
    items
}

/// Current members of the group `key`, in creation order.
fn live_members(registry: &WindowRegistry, key: &str) -> Vec<TaskbarWindow> {
    registry
        .taskbar_windows()
        .filter(|w| w.group_key() == key)
        .map(TaskbarWindow::from)
        .collect()
}

fn activate(registry: &mut WindowRegistry, member: &TaskbarWindow) -> bool {
    if member.minimized {
        registry.restore(member.id)
    } else {
        registry.focus_window(member.id)
    }
}

/// Left click on a taskbar entry. Returns the window that was acted on.
///
/// A single window toggles: minimized restores, focused minimizes, anything
/// else focuses. A group cycles from the focused member to the next one
/// (wrapping), or brings up the first usable member when none is focused.
pub fn on_item_click(registry: &mut WindowRegistry, item: &TaskbarItem) -> Option<WindowId> {
    let members = live_members(registry, &item.id);
    let (target, applied) = match members.as_slice() {
        [] => return None,
        [only] => {
            let applied = if only.minimized {
                registry.restore(only.id)
            } else if only.focused {
                registry.minimize(only.id)
            } else {
                registry.focus_window(only.id)
            };
            (only.id, applied)
        }
        _ => {
            let target = match members.iter().position(|m| m.focused) {
                Some(idx) => &members[(idx + 1) % members.len()],
                None => members
                    .iter()
                    .find(|m| !m.minimized)
                    .unwrap_or(&members[0]),
            };
            (target.id, activate(registry, target))
        }
    };
    tracing::debug!(group = %item.id, window_id = %target, applied, "taskbar click");
    applied.then_some(target)
}

/// Preview shown while hovering a taskbar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Window {
        id: WindowId,
        title: String,
        icon: Option<String>,
        minimized: bool,
        focused: bool,
        closable: bool,
    },
    Group {
        title: String,
        icon: Option<String>,
        count: usize,
        label: String,
    },
}

pub fn on_item_hover(registry: &WindowRegistry, item: &TaskbarItem) -> Option<Thumbnail> {
    let members = live_members(registry, &item.id);
    match members.as_slice() {
        [] => None,
        [only] => Some(Thumbnail::Window {
            id: only.id,
            title: only.title.clone(),
            icon: item.icon.clone(),
            minimized: only.minimized,
            focused: only.focused,
            closable: only.closable,
        }),
        _ => Some(Thumbnail::Group {
            title: members[0].title.clone(),
            icon: item.icon.clone(),
            count: members.len(),
            label: format!("{} windows", members.len()),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskbarMenuAction {
    Focus { id: WindowId, title: String },
    CloseWindow(WindowId),
    CloseAll(Vec<WindowId>),
    Restore(Vec<WindowId>),
}

impl TaskbarMenuAction {
    pub fn label(&self) -> String {
        match self {
            TaskbarMenuAction::Focus { title, .. } => title.clone(),
            TaskbarMenuAction::CloseWindow(_) => "Close window".to_string(),
            TaskbarMenuAction::CloseAll(ids) => format!("Close all ({})", ids.len()),
            TaskbarMenuAction::Restore(_) => "Restore".to_string(),
        }
    }
}

/// Right click on a taskbar entry: focus entries for every member of a
/// group, then close, then restore when something is minimized.
pub fn context_menu(registry: &WindowRegistry, item: &TaskbarItem) -> Vec<TaskbarMenuAction> {
    let members = live_members(registry, &item.id);
    let mut actions = Vec::new();
    if members.len() > 1 {
        actions.extend(members.iter().map(|m| TaskbarMenuAction::Focus {
            id: m.id,
            title: m.title.clone(),
        }));
    }
    let closable: Vec<WindowId> = members.iter().filter(|m| m.closable).map(|m| m.id).collect();
    if members.len() == 1 && closable.len() == 1 {
        actions.push(TaskbarMenuAction::CloseWindow(closable[0]));
    } else if !closable.is_empty() {
        actions.push(TaskbarMenuAction::CloseAll(closable));
    }
    let minimized: Vec<WindowId> = members.iter().filter(|m| m.minimized).map(|m| m.id).collect();
    if !minimized.is_empty() {
        actions.push(TaskbarMenuAction::Restore(minimized));
    }
    actions
}

/// Apply a context menu action. Returns whether anything changed.
pub fn perform(registry: &mut WindowRegistry, action: &TaskbarMenuAction) -> bool {
    match action {
        TaskbarMenuAction::Focus { id, .. } => {
            let minimized = registry.get(*id).is_some_and(Window::is_minimized);
            if minimized {
                registry.restore(*id)
            } else {
                registry.focus_window(*id)
            }
        }
        TaskbarMenuAction::CloseWindow(id) => registry.close_window(*id),
        TaskbarMenuAction::CloseAll(ids) => ids
            .iter()
            .fold(false, |any, id| registry.close_window(*id) || any),
        TaskbarMenuAction::Restore(ids) => ids
            .iter()
            .fold(false, |any, id| registry.restore(*id) || any),
    }
}
