use std::io::{self, Stdout};
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;
use tracing::Level;

use desk_wm::config::{DesktopConfig, WindowSpec};
use desk_wm::constants::TERMINAL_EDGE_SNAP_SENSITIVITY;
use desk_wm::dispatcher::ShortcutDispatcher;
use desk_wm::drag::DragController;
use desk_wm::keybindings::{Action, SHORTCUT_HELP};
use desk_wm::log_buffer::{LogBufferHandle, set_global_log_buffer};
use desk_wm::taskbar::{self, NoBadges};
use desk_wm::tracing_sub;
use desk_wm::ui::UiFrame;
use desk_wm::view::{self, DesktopView};
use desk_wm::window::decorator::HeaderAction;
use desk_wm::window::{Point, WindowRegistry, WindowState};

const DEFAULT_WINDOWS: [&str; 4] = ["Notes", "term/Shell 1", "term/Shell 2", "Settings"];

#[derive(Parser, Debug)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Desktop-style window snapping and taskbar demo for the terminal",
    after_help = SHORTCUT_HELP
)]
struct Cli {
    /// Window to open at startup, written `title` or `group/title`. Repeatable.
    #[arg(short = 'w', long = "window", value_name = "WINDOW")]
    windows: Vec<WindowSpec>,

    /// Distance in cells from a screen edge that triggers edge snapping.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = TERMINAL_EDGE_SNAP_SENSITIVITY,
        allow_negative_numbers = true
    )]
    edge_sensitivity: i32,

    /// Snap to the zone under the pointer when no edge is close.
    #[arg(long)]
    zone_snapping: bool,

    /// Maximum tracing level shown in the taskbar status area.
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    log_level: Level,
}

impl Cli {
    fn desktop_config(&self) -> DesktopConfig {
        let windows = if self.windows.is_empty() {
            DEFAULT_WINDOWS
                .iter()
                .filter_map(|spec| spec.parse().ok())
                .collect()
        } else {
            self.windows.clone()
        };
        DesktopConfig {
            edge_sensitivity: self.edge_sensitivity,
            zone_snapping: self.zone_snapping,
            windows,
        }
    }
}

type DeskTerminal = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = cli.desktop_config();
    config
        .validate()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let logs = LogBufferHandle::default();
    set_global_log_buffer(logs.clone());
    tracing_sub::init_default(cli.log_level);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut desktop = Desktop::new(config, logs);
    let result = desktop.run(&mut terminal);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

struct Desktop {
    config: DesktopConfig,
    registry: WindowRegistry,
    view: DesktopView,
    dispatcher: ShortcutDispatcher,
    drag: DragController,
    logs: LogBufferHandle,
    hovered_item: Option<String>,
}

impl Desktop {
    fn new(config: DesktopConfig, logs: LogBufferHandle) -> Self {
        let mut registry = WindowRegistry::new();
        registry.subscribe(|event| {
            tracing::info!(window_id = %event.window_id(), ?event, "window event");
        });
        Self {
            drag: config.drag_controller(),
            config,
            registry,
            view: DesktopView::default(),
            dispatcher: ShortcutDispatcher::default(),
            logs,
            hovered_item: None,
        }
    }

    fn relayout(&mut self, width: u16, height: u16) {
        let screen = self.view.layout(Rect::new(0, 0, width, height));
        self.registry.set_screen_size(screen);
    }

    fn run(&mut self, terminal: &mut DeskTerminal) -> io::Result<()> {
        let size = terminal.size()?;
        self.relayout(size.width, size.height);
        self.config.open_windows(&mut self.registry);

        loop {
            let items = taskbar::project(&self.registry, &NoBadges);
            let preview = self.drag.preview();
            let status = self.logs.last_line();
            terminal.draw(|frame| {
                let mut ui = UiFrame::new(frame);
                self.view
                    .render_desktop(&mut ui, &self.registry, &items, preview, status.as_deref());
            })?;

            if !event::poll(Duration::from_millis(250))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(&key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.relayout(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key.code == KeyCode::Esc {
            self.view.close_menu();
            self.drag.cancel();
            return false;
        }
        matches!(
            self.dispatcher.dispatch(key, &mut self.registry, &NoBadges),
            Some(Action::Quit)
        )
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.left_press(mouse.column, mouse.row),
            MouseEventKind::Down(MouseButton::Right) => self.right_press(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) if self.drag.is_dragging() => {
                self.drag.update(&mut self.registry, point);
            }
            MouseEventKind::Up(MouseButton::Left) if self.drag.is_dragging() => {
                self.drag.end(&mut self.registry, point);
            }
            MouseEventKind::Moved => self.hover(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn left_press(&mut self, column: u16, row: u16) {
        if self.view.menu_open() {
            if let Some(action) = self.view.menu_action_at(column, row).cloned() {
                taskbar::perform(&mut self.registry, &action);
            }
            self.view.close_menu();
            return;
        }
        let items = taskbar::project(&self.registry, &NoBadges);
        if let Some(item) = self.view.taskbar_item_at(&items, column, row) {
            taskbar::on_item_click(&mut self.registry, item);
            return;
        }
        let point = Point::new(column as i32, row as i32);
        if let Some((id, action)) = self.view.header_button_at(&self.registry, point) {
            match action {
                HeaderAction::Minimize => self.registry.minimize(id),
                HeaderAction::Maximize => match self.registry.get(id).map(|w| w.state()) {
                    Some(WindowState::Maximized | WindowState::Snapped(_)) => {
                        self.registry.restore(id)
                    }
                    _ => self.registry.maximize(id),
                },
                HeaderAction::Close => self.registry.close_window(id),
            };
            return;
        }
        if let Some(id) = view::window_at(&self.registry, point) {
            if !(view::on_header(&self.registry, id, point)
                && self.drag.begin(&mut self.registry, id, point))
            {
                self.registry.focus_window(id);
            }
        }
    }

    fn right_press(&mut self, column: u16, row: u16) {
        let items = taskbar::project(&self.registry, &NoBadges);
        match self.view.taskbar_item_at(&items, column, row) {
            Some(item) => {
                let actions = taskbar::context_menu(&self.registry, item);
                self.view.open_context_menu(&item.id, actions);
            }
            None => self.view.close_menu(),
        }
    }

    fn hover(&mut self, column: u16, row: u16) {
        let items = taskbar::project(&self.registry, &NoBadges);
        let item = self.view.taskbar_item_at(&items, column, row);
        let key = item.map(|item| item.id.clone());
        if key == self.hovered_item {
            return;
        }
        match item {
            Some(item) => self
                .view
                .set_thumbnail(&item.id, taskbar::on_item_hover(&self.registry, item)),
            None => self.view.set_thumbnail("", None),
        }
        self.hovered_item = key;
    }
}
