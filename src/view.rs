//! Terminal rendering and hit-testing for the desktop.
//!
//! Terminal cells are the logical units of the registry: the desktop occupies
//! every row above the taskbar, with its origin at the top-left cell.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::drag::DragPreview;
use crate::layout::clamp_rect;
use crate::layout::snap::ScreenSize;
use crate::panel::{Panel, PanelSlot};
use crate::taskbar::{TaskbarItem, TaskbarMenuAction, Thumbnail};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::decorator::{BoxDecorator, HeaderAction, WindowDecorator};
use crate::window::{Point, WindowId, WindowRegistry};

/// Topmost drawn window under `point`.
pub fn window_at(registry: &WindowRegistry, point: Point) -> Option<WindowId> {
    registry
        .paint_order()
        .into_iter()
        .rev()
        .find(|w| w.geometry().contains(point))
        .map(|w| w.id())
}

/// Whether `point` lies on the title row of `id`.
pub fn on_header(registry: &WindowRegistry, id: WindowId, point: Point) -> bool {
    registry
        .get(id)
        .is_some_and(|w| w.geometry().contains(point) && point.y == w.geometry().y)
}

#[derive(Debug, Clone)]
struct ContextMenu {
    item_id: String,
    actions: Vec<TaskbarMenuAction>,
    rect: Rect,
}

#[derive(Debug, Clone)]
struct ThumbnailPopup {
    item_id: String,
    thumbnail: Thumbnail,
    anchor_x: u16,
}

#[derive(Debug)]
pub struct DesktopView {
    panel: Panel,
    decorator: Box<dyn WindowDecorator>,
    desktop: Rect,
    menu: Option<ContextMenu>,
    thumbnail: Option<ThumbnailPopup>,
}

impl Default for DesktopView {
    fn default() -> Self {
        Self::new(Box::new(BoxDecorator))
    }
}

impl DesktopView {
    pub fn new(decorator: Box<dyn WindowDecorator>) -> Self {
        Self {
            panel: Panel::new(),
            decorator,
            desktop: Rect::default(),
            menu: None,
            thumbnail: None,
        }
    }

    /// Lay out the terminal area and return the desktop size to hand to the
    /// registry.
    pub fn layout(&mut self, area: Rect) -> ScreenSize {
        let (desktop, _) = self.panel.split_area(area);
        self.desktop = desktop;
        ScreenSize::from(desktop)
    }

    pub fn desktop_area(&self) -> Rect {
        self.desktop
    }

    pub fn taskbar_slots(&self) -> &[PanelSlot] {
        self.panel.slots()
    }

    pub fn taskbar_item_at<'a>(
        &self,
        items: &'a [TaskbarItem],
        column: u16,
        row: u16,
    ) -> Option<&'a TaskbarItem> {
        let slot = self.panel.slot_at(column, row)?;
        items.iter().find(|item| item.id == slot.item_id)
    }

    pub fn header_button_at(
        &self,
        registry: &WindowRegistry,
        point: Point,
    ) -> Option<(WindowId, HeaderAction)> {
        let id = window_at(registry, point)?;
        let window = registry.get(id)?;
        self.decorator
            .header_button_at(window, point.x, point.y)
            .map(|action| (id, action))
    }

    // ----- popups ----------------------------------------------------------

    pub fn open_context_menu(&mut self, item_id: &str, actions: Vec<TaskbarMenuAction>) {
        self.thumbnail = None;
        if actions.is_empty() {
            self.menu = None;
            return;
        }
        let anchor_x = self
            .panel
            .slots()
            .iter()
            .find(|slot| slot.item_id == item_id)
            .map(|slot| slot.rect.x)
            .unwrap_or(self.desktop.x);
        let width = actions
            .iter()
            .map(|a| a.label().chars().count() as u16 + 2)
            .max()
            .unwrap_or(0)
            .min(self.desktop.width);
        let height = (actions.len() as u16).min(self.desktop.height);
        let max_x = self.desktop.x.saturating_add(self.desktop.width);
        let x = anchor_x.min(max_x.saturating_sub(width));
        let y = self
            .desktop
            .y
            .saturating_add(self.desktop.height)
            .saturating_sub(height);
        self.menu = Some(ContextMenu {
            item_id: item_id.to_string(),
            actions,
            rect: Rect::new(x, y, width, height),
        });
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn menu_item_id(&self) -> Option<&str> {
        self.menu.as_ref().map(|m| m.item_id.as_str())
    }

    pub fn menu_action_at(&self, column: u16, row: u16) -> Option<&TaskbarMenuAction> {
        let menu = self.menu.as_ref()?;
        if !crate::layout::rect_contains(menu.rect, column, row) {
            return None;
        }
        menu.actions.get(row.saturating_sub(menu.rect.y) as usize)
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Show (or with `None`, hide) the hover preview for the item `item_id`.
    pub fn set_thumbnail(&mut self, item_id: &str, thumbnail: Option<Thumbnail>) {
        self.thumbnail = thumbnail.map(|thumbnail| {
            let anchor_x = self
                .panel
                .slots()
                .iter()
                .find(|slot| slot.item_id == item_id)
                .map(|slot| slot.rect.x)
                .unwrap_or(self.desktop.x);
            ThumbnailPopup {
                item_id: item_id.to_string(),
                thumbnail,
                anchor_x,
            }
        });
    }

    pub fn thumbnail_item_id(&self) -> Option<&str> {
        self.thumbnail.as_ref().map(|t| t.item_id.as_str())
    }

    // ----- rendering -------------------------------------------------------

    /// Draw desktop, windows in paint order, the drag preview, the taskbar
    /// and any open popup.
    pub fn render_desktop(
        &mut self,
        frame: &mut UiFrame<'_>,
        registry: &WindowRegistry,
        items: &[TaskbarItem],
        preview: Option<DragPreview>,
        status_line: Option<&str>,
    ) {
        let desktop_style = Style::default()
            .bg(theme::desktop_bg())
            .fg(theme::desktop_fg());
        frame.fill(self.desktop, desktop_style);
        for window in registry.paint_order() {
            self.decorator.render_window(frame, window);
        }
        if let Some(preview) = preview {
            let rect = clamp_rect(preview.bounds(), self.desktop);
            let block = Block::bordered().border_style(
                Style::default()
                    .fg(theme::snap_preview())
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_widget(block, rect);
        }
        self.panel.render(frame, items, status_line);
        if let Some(menu) = &self.menu {
            render_menu(frame, menu);
        } else if let Some(popup) = &self.thumbnail {
            render_thumbnail(frame, popup, self.desktop);
        }
    }
}

fn render_menu(frame: &mut UiFrame<'_>, menu: &ContextMenu) {
    frame.render_widget(Clear, menu.rect);
    let style = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
    frame.fill(menu.rect, style);
    for (idx, action) in menu.actions.iter().enumerate() {
        let y = menu.rect.y as i32 + idx as i32;
        let label = truncate_to_width(&action.label(), menu.rect.width.saturating_sub(2) as usize);
        let x = menu.rect.x as i32;
        frame.put_str(x + 1, y, x + menu.rect.width as i32, &label, style);
    }
}

fn render_thumbnail(frame: &mut UiFrame<'_>, popup: &ThumbnailPopup, desktop: Rect) {
    let (title, detail) = match &popup.thumbnail {
        Thumbnail::Window {
            title, minimized, ..
        } => (
            title.clone(),
            if *minimized { "minimized" } else { "open" }.to_string(),
        ),
        Thumbnail::Group { title, label, .. } => (title.clone(), label.clone()),
    };
    let inner = title.chars().count().max(detail.chars().count()) as u16;
    let width = inner.saturating_add(2).min(desktop.width);
    let height = 4u16.min(desktop.height);
    let max_x = desktop.x.saturating_add(desktop.width);
    let x = popup.anchor_x.min(max_x.saturating_sub(width));
    let y = desktop.y.saturating_add(desktop.height).saturating_sub(height);
    let rect = Rect::new(x, y, width, height);
    let style = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Text::from(vec![Line::from(title), Line::from(detail)]))
            .style(style)
            .block(Block::bordered().style(style)),
        rect,
    );
}
