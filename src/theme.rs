use ratatui::style::Color;

// Centralized colors for the terminal desktop. Small helpers rather than
// constants so call sites stay stable if these ever become configurable.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    let (r, g, b) = ACCENT_RGB;
    Color::Rgb(r, g, b)
}

pub fn desktop_bg() -> Color {
    Color::Black
}
pub fn desktop_fg() -> Color {
    Color::DarkGray
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::DarkGray
}
pub fn taskbar_fg() -> Color {
    Color::Black
}
pub fn taskbar_minimized_fg() -> Color {
    Color::Gray
}
pub fn taskbar_active_bg() -> Color {
    Color::Gray
}
pub fn taskbar_active_fg() -> Color {
    Color::Black
}
pub fn taskbar_badge_fg() -> Color {
    Color::Red
}

// Context menu and thumbnail popups
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}

// Decorator
pub fn decorator_header_bg() -> Color {
    Color::Blue
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_inactive_header_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_border() -> Color {
    Color::DarkGray
}

// Drag snap preview
pub fn snap_preview() -> Color {
    accent()
}
