use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
};

use crate::layout::rect_contains;
use crate::taskbar::TaskbarItem;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

const MENU_LABEL: &str = concat!("≡ ", env!("CARGO_PKG_NAME"));

/// Screen cells occupied by one taskbar item after the last render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSlot {
    pub item_id: String,
    pub rect: Rect,
}

/// The one-row taskbar strip along the bottom of the terminal.
#[derive(Debug, Default)]
pub struct Panel {
    area: Rect,
    slots: Vec<PanelSlot>,
}

pub fn item_label(item: &TaskbarItem) -> String {
    let mut label = match &item.icon {
        Some(icon) => format!("{icon} {}", item.title),
        None => item.title.clone(),
    };
    if item.window_count > 1 {
        label.push_str(&format!(" ({})", item.window_count));
    }
    if item.has_notification || item.is_badged {
        label.push_str(" •");
    }
    label
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Split `area` into the desktop above and the taskbar row below.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let bar_h = 1u16.min(area.height);
        let desktop = Rect {
            height: area.height.saturating_sub(bar_h),
            ..area
        };
        let bar = Rect {
            x: area.x,
            y: area.y.saturating_add(desktop.height),
            width: area.width,
            height: bar_h,
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn slots(&self) -> &[PanelSlot] {
        &self.slots
    }

    pub fn slot_at(&self, column: u16, row: u16) -> Option<&PanelSlot> {
        self.slots
            .iter()
            .find(|slot| rect_contains(slot.rect, column, row))
    }

    /// Draw the strip and record where each item landed. `status_line` is
    /// right-aligned into whatever room the items leave.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, items: &[TaskbarItem], status_line: Option<&str>) {
        self.slots.clear();
        let area = self.area;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        for xx in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = buffer.cell_mut((xx, bounds.y)) {
                cell.set_symbol(" ");
                cell.set_style(base);
            }
        }
        let y = bounds.y;
        let max_x = bounds.x.saturating_add(bounds.width);
        let mut x = bounds.x;
        let menu_width = MENU_LABEL.chars().count() as u16;
        if x.saturating_add(menu_width) < max_x {
            safe_set_string(buffer, bounds, x, y, MENU_LABEL, base.add_modifier(Modifier::BOLD));
            x = x.saturating_add(menu_width + 1);
        }

        for item in items {
            let chunk = format!(" {} ", item_label(item));
            let chunk_width = chunk.chars().count() as u16;
            if x.saturating_add(chunk_width) > max_x {
                break;
            }
            let all_minimized = item.windows.iter().all(|w| w.minimized);
            let style = if item.is_active {
                Style::default()
                    .bg(theme::taskbar_active_bg())
                    .fg(theme::taskbar_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else if all_minimized {
                base.fg(theme::taskbar_minimized_fg())
                    .add_modifier(Modifier::ITALIC)
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            if item.has_notification || item.is_badged {
                let badge_x = x + chunk_width - 2;
                if let Some(cell) = buffer.cell_mut((badge_x, y)) {
                    cell.set_fg(theme::taskbar_badge_fg());
                }
            }
            self.slots.push(PanelSlot {
                item_id: item.id.clone(),
                rect: Rect::new(x, y, chunk_width, 1),
            });
            x = x.saturating_add(chunk_width + 1);
        }

        if let Some(status) = status_line {
            let room = max_x.saturating_sub(x).saturating_sub(1) as usize;
            if room > 0 {
                let text = truncate_to_width(status, room);
                let start = max_x.saturating_sub(text.chars().count() as u16);
                safe_set_string(buffer, bounds, start, y, &text, base.add_modifier(Modifier::DIM));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::snap::ScreenSize;
    use crate::taskbar::{NoBadges, project};
    use crate::window::{WindowConfig, WindowRegistry};
    use ratatui::buffer::Buffer;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn split_reserves_bottom_row() {
        let mut panel = Panel::new();
        let (desktop, bar) = panel.split_area(Rect::new(0, 0, 80, 24));
        assert_eq!(desktop, Rect::new(0, 0, 80, 23));
        assert_eq!(bar, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn render_records_slots_in_item_order() {
        let mut reg = WindowRegistry::with_screen(ScreenSize::new(60, 9));
        reg.create_window(WindowConfig::new("one").with_group("term"));
        reg.create_window(WindowConfig::new("two").with_group("term"));
        reg.create_window(WindowConfig::new("Notes"));
        let items = project(&reg, &NoBadges);

        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        let mut panel = Panel::new();
        panel.split_area(area);
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            panel.render(&mut ui, &items, None);
        }
        let text = row(&buf, 9);
        assert!(text.starts_with("≡ desk-wm  one (2)   Notes "), "{text}");
        assert_eq!(panel.slots().len(), 2);
        let first = &panel.slots()[0];
        assert_eq!(first.item_id, "term");
        assert_eq!(first.rect, Rect::new(10, 9, 9, 1));
        assert_eq!(panel.slot_at(12, 9).map(|s| s.item_id.as_str()), Some("term"));
        assert_eq!(panel.slot_at(19, 9), None);
    }

    #[test]
    fn items_that_do_not_fit_are_dropped() {
        let mut reg = WindowRegistry::with_screen(ScreenSize::new(12, 4));
        reg.create_window(WindowConfig::new("a rather long title"));
        let items = project(&reg, &NoBadges);
        let area = Rect::new(0, 0, 12, 5);
        let mut buf = Buffer::empty(area);
        let mut panel = Panel::new();
        panel.split_area(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        panel.render(&mut ui, &items, Some("log"));
        assert!(panel.slots().is_empty());
    }
}
