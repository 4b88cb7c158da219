use std::rc::Rc;

use ratatui::layout::Size;

use super::{FloatRect, Point, WindowConfig, WindowId};
use crate::layout::snap::SnapPosition;

/// Inbound operation accepted by [`super::WindowRegistry::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    Create(WindowConfig),
    Focus(WindowId),
    Move { id: WindowId, position: Point },
    Resize { id: WindowId, size: Size },
    Minimize(WindowId),
    Maximize(WindowId),
    Restore(WindowId),
    Snap { id: WindowId, position: SnapPosition },
    Close(WindowId),
    ToggleAlwaysOnTop(WindowId),
    UpdateTitle { id: WindowId, title: String },
}

impl WindowCommand {
    /// Target of the command; `None` for `Create`.
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            WindowCommand::Create(_) => None,
            WindowCommand::Focus(id)
            | WindowCommand::Minimize(id)
            | WindowCommand::Maximize(id)
            | WindowCommand::Restore(id)
            | WindowCommand::Close(id)
            | WindowCommand::ToggleAlwaysOnTop(id) => Some(*id),
            WindowCommand::Move { id, .. }
            | WindowCommand::Resize { id, .. }
            | WindowCommand::Snap { id, .. }
            | WindowCommand::UpdateTitle { id, .. } => Some(*id),
        }
    }
}

/// Result of applying a [`WindowCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Created(WindowId),
    Applied,
    /// Unknown id, capability violation or nothing to change.
    Ignored,
}

impl From<bool> for CommandOutcome {
    fn from(applied: bool) -> Self {
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }
}

/// Outbound notification, one per successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Created {
        id: WindowId,
    },
    Focused {
        id: WindowId,
        previous: Option<WindowId>,
    },
    BroughtToFront {
        id: WindowId,
        z_index: u64,
    },
    Moved {
        id: WindowId,
        position: Point,
    },
    Resized {
        id: WindowId,
        size: Size,
    },
    Minimized {
        id: WindowId,
    },
    Maximized {
        id: WindowId,
        geometry: FloatRect,
    },
    Restored {
        id: WindowId,
        geometry: FloatRect,
    },
    Closed {
        id: WindowId,
    },
    TitleChanged {
        id: WindowId,
        title: String,
    },
    Snapped {
        id: WindowId,
        position: SnapPosition,
        geometry: FloatRect,
    },
    AlwaysOnTopChanged {
        id: WindowId,
        enabled: bool,
    },
}

impl WindowEvent {
    pub fn window_id(&self) -> WindowId {
        match self {
            WindowEvent::Created { id }
            | WindowEvent::Focused { id, .. }
            | WindowEvent::BroughtToFront { id, .. }
            | WindowEvent::Moved { id, .. }
            | WindowEvent::Resized { id, .. }
            | WindowEvent::Minimized { id }
            | WindowEvent::Maximized { id, .. }
            | WindowEvent::Restored { id, .. }
            | WindowEvent::Closed { id }
            | WindowEvent::TitleChanged { id, .. }
            | WindowEvent::Snapped { id, .. }
            | WindowEvent::AlwaysOnTopChanged { id, .. } => *id,
        }
    }
}

/// Handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub(super) u64);

pub(super) type Listener = Rc<dyn Fn(&WindowEvent)>;
