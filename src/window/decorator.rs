use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::UiFrame;
use crate::window::{Window, WindowState};

const BUTTON_WIDTH: i32 = 3;

/// Title bar buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
}

impl HeaderAction {
    fn glyph(self, state: WindowState) -> &'static str {
        match self {
            HeaderAction::Minimize => "[_]",
            HeaderAction::Maximize => match state {
                WindowState::Maximized | WindowState::Snapped(_) => "[=]",
                _ => "[+]",
            },
            HeaderAction::Close => "[x]",
        }
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw frame and title bar of `window` at its current geometry.
    fn render_window(&self, frame: &mut UiFrame<'_>, window: &Window);

    /// Header button under the given cell, if any.
    fn header_button_at(&self, window: &Window, col: i32, row: i32) -> Option<HeaderAction>;
}

/// Buttons the window's capabilities allow, with the column each starts at.
fn header_buttons(window: &Window) -> Vec<(HeaderAction, i32)> {
    let caps = window.capabilities();
    let actions: Vec<HeaderAction> = [
        (HeaderAction::Minimize, caps.minimizable),
        (HeaderAction::Maximize, caps.maximizable),
        (HeaderAction::Close, caps.closable),
    ]
    .into_iter()
    .filter_map(|(action, allowed)| allowed.then_some(action))
    .collect();
    let rect = window.geometry();
    let start = rect.right() - 1 - BUTTON_WIDTH * actions.len() as i32;
    // keep the left corner and one title cell free
    if start < rect.x + 2 {
        return Vec::new();
    }
    actions
        .into_iter()
        .enumerate()
        .map(|(idx, action)| (action, start + idx as i32 * BUTTON_WIDTH))
        .collect()
}

/// Single-line box frame with the title bar on the top border row.
#[derive(Debug, Default)]
pub struct BoxDecorator;

impl WindowDecorator for BoxDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, window: &Window) {
        let rect = window.geometry();
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let header_style = if window.has_focus() {
            Style::default()
                .bg(theme::decorator_header_bg())
                .fg(theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::decorator_inactive_header_bg())
                .fg(theme::decorator_header_fg())
        };
        let border_style = Style::default().fg(theme::decorator_border());

        let left = rect.x;
        let top = rect.y;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        // Body
        let body = Style::default();
        for y in top + 1..bottom {
            for x in left + 1..right {
                frame.put(x, y, " ", body);
            }
        }

        // Header row doubles as the top border.
        for x in left..=right {
            frame.put(x, top, " ", header_style);
        }
        let buttons = header_buttons(window);
        let title_end = buttons.first().map(|(_, x)| *x - 1).unwrap_or(right);
        let title = if window.is_always_on_top() {
            format!("^ {}", window.title())
        } else {
            window.title().to_string()
        };
        frame.put_str(left + 1, top, title_end, &title, header_style);
        for (action, x) in &buttons {
            frame.put_str(*x, top, right, action.glyph(window.state()), header_style);
        }
        if rect.height < 2 {
            return;
        }

        for y in top + 1..bottom {
            frame.put(left, y, "│", border_style);
            frame.put(right, y, "│", border_style);
        }
        for x in left + 1..right {
            frame.put(x, bottom, "─", border_style);
        }
        frame.put(left, bottom, "└", border_style);
        frame.put(right, bottom, "┘", border_style);
    }

    fn header_button_at(&self, window: &Window, col: i32, row: i32) -> Option<HeaderAction> {
        if row != window.geometry().y {
            return None;
        }
        header_buttons(window)
            .into_iter()
            .find(|(_, x)| (*x..*x + BUTTON_WIDTH).contains(&col))
            .map(|(action, _)| action)
    }
}
